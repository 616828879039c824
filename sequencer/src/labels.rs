use crate::{
    error::{Result, SequenceError},
    source::{ByteSource, read_exact_at},
};

pub const NUM_CLASSES: usize = 10;

/// Global glyph positions grouped by digit label, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelIndex {
    num_labels: usize,
    positions: [Vec<usize>; NUM_CLASSES],
}

impl LabelIndex {
    /// Parses a label blob: `[magic][num_labels]` (big-endian u32) then one byte per label.
    pub fn parse<S: ByteSource + ?Sized>(source: &S) -> Result<Self> {
        let b = read_exact_at(source, 4, 4)?;
        let num_labels = u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as usize;
        let labels = read_exact_at(source, 8, num_labels)?;
        let index = Self::from_labels(&labels)?;
        tracing::debug!(
            num_labels,
            per_class = ?index.positions.iter().map(Vec::len).collect::<Vec<_>>(),
            "parsed label index"
        );
        Ok(index)
    }

    /// Builds the index from raw label bytes; position `i` carries `labels[i]`.
    pub fn from_labels(labels: &[u8]) -> Result<Self> {
        let mut positions: [Vec<usize>; NUM_CLASSES] = Default::default();
        for (pos, &label) in labels.iter().enumerate() {
            let Some(bucket) = positions.get_mut(label as usize) else {
                return Err(SequenceError::MalformedCorpus(format!(
                    "label {label} at position {pos} is not a digit"
                )));
            };
            bucket.push(pos);
        }
        Ok(Self {
            num_labels: labels.len(),
            positions,
        })
    }

    pub fn num_labels(&self) -> usize {
        self.num_labels
    }

    /// Empty for labels with no glyphs and for labels above 9.
    pub fn positions_for(&self, label: u8) -> &[usize] {
        self.positions
            .get(label as usize)
            .map_or(&[][..], Vec::as_slice)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn label_blob(labels: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&0x0000_0801u32.to_be_bytes());
        out.extend_from_slice(&(labels.len() as u32).to_be_bytes());
        out.extend_from_slice(labels);
        out
    }

    #[test]
    fn groups_positions_in_file_order() {
        let idx = LabelIndex::parse(&label_blob(&[3, 1, 3, 0, 1, 3])).unwrap();
        assert_eq!(idx.num_labels(), 6);
        assert_eq!(idx.positions_for(3), &[0, 2, 5]);
        assert_eq!(idx.positions_for(1), &[1, 4]);
        assert_eq!(idx.positions_for(0), &[3]);
        assert!(idx.positions_for(7).is_empty());
        assert!(idx.positions_for(42).is_empty());
    }

    #[test]
    fn positions_partition_the_label_range() {
        let labels: Vec<u8> = (0..97u32).map(|i| ((i * 7 + 3) % 10) as u8).collect();
        let idx = LabelIndex::from_labels(&labels).unwrap();

        let mut all: Vec<usize> = (0..10).flat_map(|l| idx.positions_for(l).to_vec()).collect();
        all.sort_unstable();
        assert_eq!(all, (0..97).collect::<Vec<_>>());
    }

    #[test]
    fn ignores_bytes_past_count() {
        let mut blob = label_blob(&[2, 2]);
        blob.push(11);
        let idx = LabelIndex::parse(&blob).unwrap();
        assert_eq!(idx.positions_for(2), &[0, 1]);
    }

    #[test]
    fn non_digit_label_is_malformed() {
        let err = LabelIndex::parse(&label_blob(&[1, 10])).unwrap_err();
        assert!(matches!(err, SequenceError::MalformedCorpus(_)));
    }

    /// Drops the last byte of every read.
    struct ShortReads(Vec<u8>);

    impl ByteSource for ShortReads {
        fn read_at(&self, offset: u64, len: usize) -> std::io::Result<Vec<u8>> {
            let mut bytes = self.0.read_at(offset, len)?;
            bytes.pop();
            Ok(bytes)
        }
    }

    #[test]
    fn short_source_reads_are_malformed() {
        let err = LabelIndex::parse(&ShortReads(label_blob(&[1, 2, 3]))).unwrap_err();
        assert!(matches!(err, SequenceError::MalformedCorpus(_)));
    }

    #[test]
    fn huge_count_in_short_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut blob = label_blob(&[4, 4]);
        blob[4..8].copy_from_slice(&u32::MAX.to_be_bytes());
        std::io::Write::write_all(&mut file, &blob).unwrap();

        let src = crate::source::FileSource::new(file.path());
        assert!(matches!(
            LabelIndex::parse(&src),
            Err(SequenceError::Io(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof
        ));
    }

    #[test]
    fn short_blob_is_io_error() {
        let mut blob = label_blob(&[1, 2, 3]);
        blob.truncate(10);
        assert!(matches!(
            LabelIndex::parse(&blob),
            Err(SequenceError::Io(_))
        ));
    }
}
