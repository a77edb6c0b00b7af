fn main() {
    // ESP-IDF environment for esp-idf-sys; emits nothing on host builds
    embuild::espidf::sysenv::output();
}
