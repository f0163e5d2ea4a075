use crate::encoding::wire::encoded_len_varint;

pub trait EncodedSize {
    fn encoded_size(&self) -> usize;

    /// Size once framed as a length-delimited value: length prefix plus body.
    fn delimited_size(&self) -> usize {
        let len = self.encoded_size();
        encoded_len_varint(len as u64) + len
    }
}

impl EncodedSize for str {
    fn encoded_size(&self) -> usize {
        self.len()
    }
}

impl EncodedSize for String {
    fn encoded_size(&self) -> usize {
        self.as_str().encoded_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimited_size() {
        assert_eq!("".delimited_size(), 1);
        assert_eq!("items".delimited_size(), 6);
        let long = "x".repeat(128);
        assert_eq!(long.delimited_size(), 130);
    }
}
