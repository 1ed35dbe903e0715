//! The handful of BCS encodings needed for pure Move arguments.

/// ULEB128 length prefix used for BCS sequences.
pub(crate) fn uleb128(mut value: usize, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// `vector<u8>`
pub(crate) fn bytes(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 2);
    uleb128(data.len(), &mut out);
    out.extend_from_slice(data);
    out
}
