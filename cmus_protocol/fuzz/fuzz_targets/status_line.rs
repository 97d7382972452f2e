#![no_main]
use libfuzzer_sys::fuzz_target;

use cmus_protocol::parser::{status_line, StatusLine};

fuzz_target!(|data: &str| {
    for line in data.lines() {
        if let StatusLine::Other(other) = status_line(line) {
            assert_eq!(other, line);
        }
    }
});
