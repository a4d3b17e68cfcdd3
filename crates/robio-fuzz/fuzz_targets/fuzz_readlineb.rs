#![no_main]
use libfuzzer_sys::fuzz_target;
use robio_core::scripted::ScriptedDescriptor;
use robio_core::{LineEnd, RioStream};

// Header bytes pick buffer size, line size and chunking; the rest is input.
// Concatenating every line read must reproduce the input exactly.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    let bufsize = usize::from(data[0] % 32) + 1;
    let maxlen = usize::from(data[1] % 32) + 1;
    let chunk = usize::from(data[2] % 8) + 1;
    let input = &data[3..];

    let src = ScriptedDescriptor::from_bytes(input)
        .chunked(chunk)
        .interrupt_alternate();
    let Ok(mut stream) = RioStream::with_capacity(src, bufsize) else {
        return;
    };

    let mut out = Vec::with_capacity(input.len());
    let mut line = vec![0u8; maxlen];
    let mut stalls = 0usize;
    loop {
        let got = stream.read_line(&mut line).unwrap();
        assert_eq!(line[got.len], 0);
        assert!(got.len < maxlen);
        assert!(stream.unread() <= stream.capacity());
        out.extend_from_slice(&line[..got.len]);
        match got.end {
            LineEnd::Newline => assert_eq!(line[got.len - 1], b'\n'),
            LineEnd::Truncated => assert_eq!(got.len, maxlen - 1),
            LineEnd::EndOfStream => {
                if got.len == 0 {
                    break;
                }
            }
        }
        // maxlen == 1 never makes progress.
        if got.len == 0 {
            stalls += 1;
            if stalls > 1 {
                return;
            }
        }
    }
    assert_eq!(out, input);
});
