fn main() {
    multiversx_sc_meta_lib::cli_main::<credential_dao::AbiProvider>();
}
