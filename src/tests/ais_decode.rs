use std::vec::Vec;

use crate::{
    Sentence,
    ais::{
        Assembler, Dimensions, Eta, Fragment, MessageKind, Payload, PositionReport, StaticData,
        get_binary_bits, sentinel,
    },
    tests::support::{frame, sentence},
};

const CLASS_A: &[u8] = b"15M67N0000G?Uf6E`FepT@3n00Sa";
const CLASS_B: &[u8] = b"B52K>;h00Fc>jpUlNV@ikwpUoP06";
const EXTENDED_CLASS_B: &[u8] = b"C5N3SRgPEnJGEBT>NhWAwwo862PaLELTBJ:V00000000S0D:R220";
const PART_A: &[u8] = b"H42O55i18tMET00000000000000";
const PART_B: &[u8] = b"H42O55lti4hhhilD3nink000?050";

#[test]
fn test_hand_computed_bits() {
    // 'w' = 111111, '0' = 000000, 'W' = 100111
    assert_eq!(get_binary_bits(b"w0W", 0, 5), Some(0b111111));
    assert_eq!(get_binary_bits(b"w0W", 3, 8), Some(0b111000));
    assert_eq!(get_binary_bits(b"w0W", 11, 14), Some(0b0100));
    assert_eq!(get_binary_bits(b"w0W", 0, 17), Some(0b111111_000000_100111));
    assert_eq!(get_binary_bits(b"w0W", 12, 17), Some(0b100111));
    assert_eq!(get_binary_bits(b"w0W", 17, 17), Some(1));
    assert_eq!(get_binary_bits(b"w0W", 18, 18), None);
    assert_eq!(get_binary_bits(b"wwwwww", 0, 31), Some(u32::MAX));
    assert_eq!(get_binary_bits(b"wwwwww", 0, 32), None);
    assert_eq!(get_binary_bits(b"w0W", 5, 4), None);
}

#[test]
fn test_message_24_discrimination() {
    let part_a = Payload::new(PART_A);
    let part_b = Payload::new(PART_B);

    assert_eq!(part_a.message_id(), Some(24));
    assert_eq!(part_b.message_id(), Some(24));
    assert_eq!(part_a.kind(), Some(MessageKind::StaticDataA));
    assert_eq!(part_b.kind(), Some(MessageKind::StaticDataB));

    assert_eq!(part_a.name().as_deref(), Some("PROGUY@@@@@@@@@@@@@@"));
    assert_eq!(part_a.call_sign(), None);
    assert_eq!(part_a.cargo_type(), None);

    assert_eq!(part_b.name(), None);
    assert_eq!(part_b.cargo_type(), Some(60));
    assert_eq!(part_b.vendor_id().as_deref(), Some("1D00014"));
    assert_eq!(part_b.call_sign().as_deref(), Some("TC6163@"));
    assert_eq!(
        part_b.dimensions(),
        Some(Dimensions {
            to_bow: 0,
            to_stern: 15,
            to_port: 0,
            to_starboard: 5,
        })
    );

    let mut data = StaticData::from_payload(&part_a).unwrap();
    assert!(data.merge(StaticData::from_payload(&part_b).unwrap()));
    assert_eq!(data.mmsi, 271_041_815);
    assert_eq!(data.name.as_deref(), Some("PROGUY"));
    assert_eq!(data.call_sign.as_deref(), Some("TC6163"));
    assert_eq!(data.cargo_type, Some(60));

    let other = StaticData {
        mmsi: 1,
        ..StaticData::default()
    };
    assert!(!data.merge(other));
}

#[test]
fn test_sentinels_by_message_type() {
    let class_b = Payload::new(CLASS_B);
    assert_eq!(class_b.kind(), Some(MessageKind::StandardClassB));
    assert_eq!(sentinel::rate_of_turn(&class_b), i8::MIN);
    assert_eq!(sentinel::or_sentinel(class_b.navigation_status()), u8::MAX);
    assert_eq!(sentinel::or_sentinel(class_b.imo_number()), u32::MAX);
    assert_eq!(sentinel::draught(&class_b), sentinel::DRAUGHT_NOT_APPLICABLE);
    assert_eq!(class_b.true_heading(), Some(511));

    let extended = Payload::new(EXTENDED_CLASS_B);
    assert_eq!(extended.kind(), Some(MessageKind::ExtendedClassB));
    assert_eq!(sentinel::or_sentinel(extended.eta_bits()), u32::MAX);
    assert_eq!(sentinel::or_sentinel(extended.cargo_type()), 70);
    assert_eq!(sentinel::or_sentinel(extended.communication_state()), u32::MAX);
}

#[test]
fn test_length_check() {
    assert!(Payload::new(CLASS_A).check_length());
    assert!(Payload::new(EXTENDED_CLASS_B).check_length());
    assert!(Payload::new(PART_A).check_length());
    assert!(Payload::new(PART_B).check_length());
    assert!(!Payload::new(&CLASS_A[..27]).check_length());

    // Type 18 is checked against the type 5 length.
    assert!(!Payload::new(CLASS_B).check_length());
}

#[test]
fn test_position_reports_from_sentences() {
    let mut reports = Vec::new();
    let input = [
        sentence("AIVDM,1,1,,A,15M67N0000G?Uf6E`FepT@3n00Sa,0"),
        sentence("AIVDM,1,1,,B,B52K>;h00Fc>jpUlNV@ikwpUoP06,0"),
        sentence("AIVDM,1,1,,B,H42O55i18tMET00000000000000,2"),
    ]
    .concat();

    let stats = frame(input.as_bytes(), |sentence: &Sentence<'_>| {
        let payload = sentence.ais_payload().unwrap();
        if let Some(report) = PositionReport::from_payload(&payload) {
            reports.push(report);
        }
    });
    assert_eq!(stats.sentences, 3);
    assert_eq!(reports.len(), 2);

    let class_a = &reports[0];
    assert_eq!(class_a.message_id, 1);
    assert_eq!(class_a.mmsi, 366_053_240);
    assert_eq!(class_a.rate_of_turn, Some(0));
    assert_eq!(class_a.heading(), Some(1));
    assert_eq!(class_a.course_degrees(), Some(219.3));
    assert!((class_a.latitude_degrees().unwrap() - 37.802_118).abs() < 1e-5);
    assert!((class_a.longitude_degrees().unwrap() + 122.423_568).abs() < 1e-5);

    let class_b = &reports[1];
    assert_eq!(class_b.message_id, 18);
    assert_eq!(class_b.mmsi, 338_087_471);
    assert_eq!(class_b.navigation_status, None);
    assert_eq!(class_b.heading(), None);
    assert_eq!(class_b.speed_knots(), Some(0.1));
    assert_eq!(class_b.timestamp, 49);
}

#[test]
fn test_static_voyage_from_fragments() {
    let mut assembler = Assembler::new();
    let fragments = [
        Fragment {
            count: 2,
            number: 1,
            sequence_id: Some(7),
            payload: "55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8",
            fill_bits: 0,
        },
        Fragment {
            count: 2,
            number: 2,
            sequence_id: Some(7),
            payload: "88888888880",
            fill_bits: 2,
        },
    ];

    let complete = fragments
        .into_iter()
        .find_map(|fragment| assembler.push(fragment))
        .unwrap();
    let payload = complete.payload();
    assert_eq!(payload.kind(), Some(MessageKind::StaticVoyage));
    assert_eq!(payload.bit_len(), 424);

    let data = StaticData::from_payload(&payload).unwrap();
    assert_eq!(data.mmsi, 351_759_000);
    assert_eq!(data.imo_number, Some(9_134_270));
    assert_eq!(data.call_sign.as_deref(), Some("3FOF8"));
    assert_eq!(data.name.as_deref(), Some("EVER`DIADEM"));
    assert_eq!(data.destination.as_deref(), Some("NEW`YORK"));
    assert_eq!(data.cargo_type, Some(70));
    assert_eq!(data.draught, Some(122));
    assert_eq!(data.position_fix_type, Some(1));
    assert_eq!(
        data.eta,
        Some(Eta {
            month: 5,
            day: 15,
            hour: 14,
            minute: 0,
        })
    );

    let dimensions = data.dimensions.unwrap();
    assert_eq!(dimensions.length(), 295);
    assert_eq!(dimensions.width(), 32);
}
