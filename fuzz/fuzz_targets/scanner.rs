#![no_main]

use jsonc_norm::scanner::{Scanner, Token};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut next = 0;
    for event in Scanner::new(data) {
        assert_eq!(event.range.start, next);
        next = event.range.end;
        let src = &data[event.range];
        match event.token {
            Token::Text(v) | Token::Whitespace(v) | Token::String(v) => assert_eq!(src, v),
            Token::LineComment(v) => assert_eq!(src, [&b"//"[..], v].concat()),
            Token::Comma => assert_eq!(src, b","),
            Token::ObjectEnd => assert_eq!(src, b"}"),
            Token::ArrayEnd => assert_eq!(src, b"]"),
        }
    }
    assert_eq!(next, data.len());
});
