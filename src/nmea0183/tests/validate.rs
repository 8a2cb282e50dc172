use crate::{ChecksumMode, FrameError, validate};

#[test]
fn test_validate_ok() {
    let frame = validate(b"$GPGGA,123456,data*41\r\n", ChecksumMode::Required).unwrap();
    assert_eq!(frame.checksum, Some(0x41));
    assert_eq!(frame.body_end, 18);
}

#[test]
fn test_validate_encapsulated_start_marker() {
    let res = validate(
        b"!AIVDM,1,1,,B,177KQJ5000G?tO`K>RA1wUbN0TKH,0*5C\r\n",
        ChecksumMode::Required,
    );
    assert!(res.is_ok());
}

#[test]
fn test_validate_checksum_mismatch() {
    let res = validate(b"$GPGGA,123456,data*42\r\n", ChecksumMode::Required);
    assert_eq!(
        res,
        Err(FrameError::ChecksumMismatch {
            calculated: 0x41,
            found: *b"42",
        })
    );
}

#[test]
fn test_validate_lowercase_hex() {
    // "GPXXX" checksums to 0x4F; the trailer must be uppercase.
    assert!(validate(b"$GPXXX*4F\r\n", ChecksumMode::Required).is_ok());
    let res = validate(b"$GPXXX*4f\r\n", ChecksumMode::Required);
    assert!(matches!(res, Err(FrameError::ChecksumMismatch { .. })));
}

#[test]
fn test_validate_no_cr() {
    let res = validate(b"$GPGGA,123456,data*41\n", ChecksumMode::Required);
    assert_eq!(res, Err(FrameError::Terminator));
}

#[test]
fn test_validate_no_checksum() {
    let res = validate(b"$GPGGA,123456,data\r\n", ChecksumMode::Required);
    assert_eq!(res, Err(FrameError::Terminator));

    let frame = validate(b"$GPGGA,123456,data\r\n", ChecksumMode::Optional).unwrap();
    assert_eq!(frame.checksum, None);
    assert_eq!(frame.body_end, 18);
}

#[test]
fn test_validate_optional_still_checks_present_checksum() {
    let res = validate(b"$GPGGA,123456,data*99\r\n", ChecksumMode::Optional);
    assert!(matches!(res, Err(FrameError::ChecksumMismatch { .. })));
}

#[test]
fn test_validate_address_length() {
    // "GPGGAX,1" -> checksum 0x13
    let res = validate(b"$GPGGAX,1*13\r\n", ChecksumMode::Required);
    assert_eq!(res, Err(FrameError::AddressLength(6)));

    // "GPGG,1" -> checksum 0x0A
    let res = validate(b"$GPGG,1*0A\r\n", ChecksumMode::Required);
    assert_eq!(res, Err(FrameError::AddressLength(4)));
}

#[test]
fn test_validate_address_only() {
    // "GPXXX" -> checksum 0x4F
    assert!(validate(b"$GPXXX*4F\r\n", ChecksumMode::Required).is_ok());
}

#[test]
fn test_validate_too_short() {
    assert_eq!(validate(b"\n", ChecksumMode::Optional), Err(FrameError::Terminator));
    assert_eq!(validate(b"$\r\n", ChecksumMode::Optional), Err(FrameError::AddressLength(0)));
}
