#![no_main]
use libfuzzer_sys::fuzz_target;
use robio_core::scripted::ScriptedDescriptor;
use robio_core::{RioStream, readn};

// Buffered and unbuffered read-exact must agree on any chunking.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    let bufsize = usize::from(data[0] % 64) + 1;
    let record = usize::from(data[1] % 64) + 1;
    let chunk = usize::from(data[2] % 16) + 1;
    let input = &data[3..];

    let src = ScriptedDescriptor::from_bytes(input).chunked(chunk);
    let Ok(mut stream) = RioStream::with_capacity(src, bufsize) else {
        return;
    };
    let mut raw = ScriptedDescriptor::from_bytes(input)
        .chunked(chunk)
        .interrupt_alternate();

    let mut a = vec![0u8; record];
    let mut b = vec![0u8; record];
    loop {
        let na = stream.readnb(&mut a).unwrap();
        let nb = readn(&mut raw, &mut b).unwrap();
        assert_eq!(na, nb);
        assert_eq!(a[..na], b[..nb]);
        if na < record {
            break;
        }
    }
    assert_eq!(stream.readnb(&mut a).unwrap(), 0);
});
