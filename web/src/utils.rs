/// Seed drawn from JavaScript's `Math.random`, two 32-bit halves at a time.
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    let half = || (random() * f64::from(u32::MAX)) as u64;
    (half() << 32) | half()
}

/// Zero-padded counter text for the info panel.
pub(crate) fn format_counter(num: u32) -> String {
    match num {
        0..100 => format!("{:02}", num),
        _ => num.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_keep_two_digits() {
        assert_eq!(format_counter(0), "00");
        assert_eq!(format_counter(7), "07");
        assert_eq!(format_counter(60), "60");
        assert_eq!(format_counter(120), "120");
    }

    #[cfg(target_arch = "wasm32")]
    #[wasm_bindgen_test::wasm_bindgen_test]
    fn browser_seeds_differ() {
        assert_ne!(js_random_seed(), js_random_seed());
    }
}
