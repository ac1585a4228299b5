fn main() {
    // Linker scripts for hardware builds. embassy-stm32's `memory-x` feature
    // provides memory.x for the STM32F405VG.
    #[cfg(feature = "hardware")]
    {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    println!("cargo:rerun-if-changed=build.rs");
}
