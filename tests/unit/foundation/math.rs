use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(255, 128), 128);
    assert_eq!(mul_div255_u16(0, 255), 0);
}

#[test]
fn lerp_channel_truncates() {
    assert_eq!(lerp_channel_trunc(0, 255, 0.0), 0);
    assert_eq!(lerp_channel_trunc(0, 255, 1.0), 255);
    // 0.5 * 255 = 127.5 truncates to 127.
    assert_eq!(lerp_channel_trunc(0, 255, 0.5), 127);
    assert_eq!(lerp_channel_trunc(200, 100, 0.25), 175);
}

#[test]
fn add_sat_clamps() {
    assert_eq!(add_sat_u8(200, 100), 255);
    assert_eq!(add_sat_u8(1, 2), 3);
}
