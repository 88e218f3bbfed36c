fn main() {
    println!("cargo:rerun-if-changed=config/suijin.json");

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
