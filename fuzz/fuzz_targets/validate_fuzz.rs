//! Validation fuzz target: arbitrary text as a picture string and as source.
//! Neither validate nor locate may panic, and an accepted layout never
//! describes more than 64 bits.
//! Build with: cargo fuzz run validate_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    let report = bplint::validate(s);
    if let Ok(layout) = bplint::check(s) {
        assert!(report.is_ok());
        assert!(layout.total_bits() <= bplint::MAX_BITS);
    }
    if let Ok(found) = bplint::locate(s, &bplint::LocateOptions::default()) {
        for pic in found {
            let _ = bplint::validate(pic.text);
        }
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run validate_fuzz");
}
