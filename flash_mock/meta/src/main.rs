fn main() {
    multiversx_sc_meta_lib::cli_main::<flash_mock::AbiProvider>();
}
