use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Frame an object body with its loose object header.
    pub fn frame(&self, body: &[u8]) -> Vec<u8> {
        let header = format!("{} {}\0", self.as_str(), body.len());

        let mut framed = Vec::with_capacity(header.len() + body.len());
        framed.extend_from_slice(header.as_bytes());
        framed.extend_from_slice(body);
        framed
    }

    /// Consume the `<type> <size>\0` header and check the announced size
    /// against what is left in the reader.
    pub fn parse_header(reader: &mut impl BufRead) -> anyhow::Result<(ObjectType, usize)> {
        let mut kind = Vec::new();
        reader.read_until(b' ', &mut kind)?;
        if kind.pop() != Some(b' ') {
            anyhow::bail!("truncated object header");
        }
        let object_type = ObjectType::try_from(std::str::from_utf8(&kind)?)?;

        let mut size = Vec::new();
        reader.read_until(b'\0', &mut size)?;
        if size.pop() != Some(b'\0') {
            anyhow::bail!("truncated object header");
        }
        let size = std::str::from_utf8(&size)?.parse::<usize>()?;

        Ok((object_type, size))
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            other => Err(anyhow::anyhow!("unsupported object type {other:?}")),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn header_is_parsed_back_from_a_framed_body() {
        let framed = ObjectType::Commit.frame(b"tree abc");
        let mut reader = Cursor::new(framed);

        let (object_type, size) = ObjectType::parse_header(&mut reader).unwrap();

        assert_eq!(object_type, ObjectType::Commit);
        assert_eq!(size, 8);
    }

    #[test]
    fn unknown_object_type_is_rejected() {
        let mut reader = Cursor::new(b"tag 3\0abc".to_vec());

        assert!(ObjectType::parse_header(&mut reader).is_err());
    }

    #[test]
    fn header_without_terminator_is_rejected() {
        let mut reader = Cursor::new(b"blob 3".to_vec());

        assert!(ObjectType::parse_header(&mut reader).is_err());
    }
}
