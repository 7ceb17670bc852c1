//! Property tests: arbitrary serial noise never breaks line assembly.

use proptest::prelude::*;
use swingservo_protocol::{Command, LineParser, MAX_LINE_LEN};

proptest! {
    #[test]
    fn arbitrary_bytes_never_panic(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let mut parser = LineParser::new();
        for byte in data {
            if let Some(line) = parser.feed(byte) {
                prop_assert!(line.as_bytes().len() <= MAX_LINE_LEN);
                if let Some(c) = line.first_char() {
                    // Either a command or an error, never a panic
                    let _ = Command::from_char(c);
                    prop_assert!(!c.is_whitespace());
                }
            }
            prop_assert!(parser.pending() <= MAX_LINE_LEN);
        }
    }

    #[test]
    fn first_char_survives_trailing_garbage(
        cmd in prop::sample::select(vec!['s', 'c', 'x']),
        tail in "[a-z0-9 ]{0,80}",
    ) {
        let mut parser = LineParser::new();
        let mut line = None;
        let mut input = std::string::String::new();
        input.push(cmd);
        input.push_str(&tail);
        input.push('\n');
        for byte in input.bytes() {
            if let Some(l) = parser.feed(byte) {
                line = Some(l);
            }
        }
        let line = line.expect("terminator completes a line");
        prop_assert_eq!(line.first_char(), Some(cmd));
        prop_assert_eq!(Command::from_char(cmd).map(Command::as_char), Ok(cmd));
    }
}
