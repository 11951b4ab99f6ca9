fn main() {
    // ESP-IDF link arguments are only needed for firmware builds; host
    // tests compile the library without the `espidf` feature.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
