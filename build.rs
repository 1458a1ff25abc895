fn main() {
    // Re-emits the esp-idf build environment for device builds; a no-op
    // when the crate is built for the host.
    embuild::espidf::sysenv::output();
}
