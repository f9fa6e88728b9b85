use super::*;
use crate::field::{self, FIELDS, FIELD_COUNT, RECORD_SIZE};
use tempfile::TempDir;

/// 构造测试用的 PRZT 字节流：标签 1，两条记录
fn create_test_bytes() -> Vec<u8> {
    let mut data = vec![0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00];
    for i in 0..2u8 {
        let mut record = [0u8; RECORD_SIZE];
        record[0] = 10 + i;
        for (offset, byte) in record.iter_mut().enumerate().skip(2).take(9) {
            *byte = offset as u8 + i;
        }
        record[11] = 0x5A;
        record[12..14].copy_from_slice(&(0x0100u16 + i as u16).to_le_bytes());
        record[14..16].copy_from_slice(&(-5i16).to_le_bytes());
        data.extend_from_slice(&record);
    }
    data
}

fn create_test_file() -> PrztFile {
    PrztFile::parse(PathBuf::from("przt_0.list"), &create_test_bytes()).unwrap()
}

#[test]
fn test_parse_header_and_records() {
    let file = create_test_file();

    assert_eq!(file.format_tag(), 1);
    assert_eq!(file.header.record_count, 2);
    assert_eq!(file.record_count(), 2);
    assert_eq!(file.get_name(), "przt_0.list");

    assert_eq!(file.get_field(0, field::ID).unwrap(), 10);
    assert_eq!(file.get_field(1, field::ID).unwrap(), 11);
    assert_eq!(file.get_field(0, field::PADDING).unwrap(), 0x5A);
    assert_eq!(file.get_field(1, field::ITEM1).unwrap(), 0x0101);
    assert_eq!(file.get_field(0, 12).unwrap(), -5);
}

#[test]
fn test_rebuild_is_byte_exact() {
    let data = create_test_bytes();
    let file = PrztFile::parse(PathBuf::from("przt_0.list"), &data).unwrap();
    assert_eq!(file.to_bytes().unwrap(), data);
}

#[test]
fn test_empty_file_with_zero_records() {
    let data = vec![0xAB, 0xCD, 0xEF, 0x01, 0, 0, 0, 0];
    let file = PrztFile::parse(PathBuf::new(), &data).unwrap();
    assert_eq!(file.record_count(), 0);
    assert_eq!(file.to_bytes().unwrap(), data);
}

#[test]
fn test_corrupt_length_mismatch() {
    let mut data = create_test_bytes();
    data.pop();
    assert!(matches!(
        PrztFile::parse(PathBuf::new(), &data),
        Err(PrztError::CorruptFile(_))
    ));

    let mut data = create_test_bytes();
    data.push(0);
    assert!(matches!(
        PrztFile::parse(PathBuf::new(), &data),
        Err(PrztError::CorruptFile(_))
    ));
}

#[test]
fn test_corrupt_header_count() {
    let mut data = create_test_bytes();
    data[4] = 3;
    assert!(matches!(
        PrztFile::parse(PathBuf::new(), &data),
        Err(PrztError::CorruptFile(_))
    ));

    // 超大记录数不应溢出
    data[4..8].copy_from_slice(&u32::MAX.to_le_bytes());
    assert!(matches!(
        PrztFile::parse(PathBuf::new(), &data),
        Err(PrztError::CorruptFile(_))
    ));
}

#[test]
fn test_truncated_header() {
    assert!(matches!(
        PrztFile::parse(PathBuf::new(), &[0x01, 0x00]),
        Err(PrztError::CorruptFile(_))
    ));
    assert!(matches!(
        PrztFile::parse(PathBuf::new(), &[]),
        Err(PrztError::CorruptFile(_))
    ));
}

#[test]
fn test_record_index_out_of_range() {
    let mut file = create_test_file();
    assert!(matches!(
        file.get_field(2, 0),
        Err(PrztError::IndexOutOfRange { kind: IndexKind::Record, index: 2, len: 2 })
    ));
    assert!(matches!(
        file.set_field(5, 0, 1),
        Err(PrztError::IndexOutOfRange { kind: IndexKind::Record, .. })
    ));
    assert!(matches!(
        file.get_field(0, FIELD_COUNT),
        Err(PrztError::IndexOutOfRange { kind: IndexKind::Field, .. })
    ));
}

#[test]
fn test_set_field_round_trip_range_edges() {
    let mut file = create_test_file();

    for (index, descriptor) in FIELDS.iter().enumerate() {
        for value in [descriptor.min(), descriptor.max()] {
            file.set_field(0, index, value).unwrap();
            assert_eq!(file.get_field(0, index).unwrap(), value, "field {}", descriptor.name);
        }

        let before = file.get_field(0, index).unwrap();
        for value in [descriptor.min() - 1, descriptor.max() + 1] {
            assert!(matches!(
                file.set_field(0, index, value),
                Err(PrztError::ValueOutOfRange { .. })
            ));
            assert_eq!(file.get_field(0, index).unwrap(), before);
        }
    }

    // 修改后依然可以编码
    let rebuilt = PrztFile::parse(PathBuf::new(), &file.to_bytes().unwrap()).unwrap();
    assert_eq!(rebuilt.records, file.records);
}

#[test]
fn test_set_field_for_all() {
    let mut file = create_test_file();

    assert_eq!(file.set_field_for_all(field::ITEM2, 42).unwrap(), 2);
    for i in 0..file.record_count() {
        assert_eq!(file.get_field(i, field::ITEM2).unwrap(), 42);
    }
}

#[test]
fn test_set_field_for_all_invalid_changes_nothing() {
    let mut file = create_test_file();
    let before = file.records.clone();

    assert!(matches!(
        file.set_field_for_all(field::ID, 70000),
        Err(PrztError::ValueOutOfRange { field: "id", value: 70000, .. })
    ));
    assert!(matches!(
        file.set_field_for_all(FIELD_COUNT, 1),
        Err(PrztError::IndexOutOfRange { kind: IndexKind::Field, .. })
    ));
    assert_eq!(file.records, before);
}

#[test]
fn test_record_count_recomputed_on_write() {
    let mut file = create_test_file();
    let extra = file.records[0];
    file.records.push(extra);

    let data = file.to_bytes().unwrap();
    assert_eq!(data.len(), 8 + 3 * RECORD_SIZE);
    assert_eq!(&data[0..4], &[0x01, 0x00, 0x00, 0x00]);
    assert_eq!(&data[4..8], &[0x03, 0x00, 0x00, 0x00]);

    let reloaded = PrztFile::parse(PathBuf::new(), &data).unwrap();
    assert_eq!(reloaded.record_count(), 3);
}

#[test]
fn test_write_and_load_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("przt_0.list");
    std::fs::write(&file_path, create_test_bytes()).unwrap();

    let mut file = PrztFile::load(file_path.clone()).unwrap();
    file.set_field(0, field::ITEM1, 500).unwrap();
    file.write_to_file(&file_path).unwrap();

    let reloaded = PrztFile::load(file_path.clone()).unwrap();
    assert_eq!(reloaded.get_field(0, field::ITEM1).unwrap(), 500);

    let original = create_test_bytes();
    let written = std::fs::read(&file_path).unwrap();
    assert_eq!(&written[8 + RECORD_SIZE..], &original[8 + RECORD_SIZE..]);
}

#[test]
fn test_stats() {
    let mut file = create_test_file();
    file.set_field(1, field::ITEM1, 0).unwrap();

    let stats = file.get_stats();
    assert_eq!(stats.record_count, 2);
    assert_eq!(stats.file_size, 8 + 2 * RECORD_SIZE);
    assert_eq!(stats.records_with_drops, 2);
    assert_eq!(stats.records_with_items, 1);
    assert_eq!(stats.distinct_items, 1);
    assert!(stats.to_string().contains("记录数量: 2"));
}

#[test]
fn test_is_same_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("przt_0.list");
    std::fs::write(&file_path, create_test_bytes()).unwrap();

    let file = PrztFile::load(file_path.clone()).unwrap();
    assert!(file.is_same_file(&file_path));
    assert!(file.is_same_file(&temp_dir.path().join(".").join("przt_0.list")));
    assert!(!file.is_same_file(&temp_dir.path().join("przt.yml")));
}
