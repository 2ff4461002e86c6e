//! Example: Extending the built-in pattern table.
//!
//! Registers two extra patterns behind the defaults and classifies a handful
//! of sample bodies, no message store required.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example custom_patterns
//! ```

use sms_otp::{OtpPattern, PatternSet};

fn main() {
    let mut patterns = PatternSet::with_defaults();

    // Custom patterns run after the built-ins, in registration order.
    patterns.register(
        OtpPattern::new(10, r"^.*PIN is (\d+).*$", "PIN is NNNN").expect("valid pattern"),
    );
    patterns.register(
        OtpPattern::new(11, r"^.*access key (\d+).*$", "access key NNNN")
            .expect("valid pattern"),
    );

    let samples = [
        "Dipak, Your OTP code is 3245.",
        "Your PIN is 8812, do not share it.",
        "Your access key 220022 expires in 10 minutes",
        "G-123456",
        "Lunch at noon?",
        "Your code is 1234, details at http://example.com/code is 9999",
    ];

    for body in samples {
        let result = patterns.classify(body);
        if result.found {
            println!("{:>8}  <- {}", result.code, body);
        } else {
            println!("  (none)  <- {}", body);
        }
    }
}
