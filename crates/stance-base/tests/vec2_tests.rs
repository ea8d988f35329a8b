use stance_base::Vec2;

#[test]
fn test_new_and_zero() {
    let v = Vec2::new(3.0_f32, 4.0);
    assert_eq!((v.x, v.y), (3.0, 4.0));
    assert_eq!(Vec2::<f32>::zero(), Vec2::new(0.0, 0.0));
}

#[test]
fn test_arithmetic() {
    let a = Vec2::new(5.0_f32, 7.0);
    let b = Vec2::new(2.0_f32, 3.0);
    assert_eq!(a + b, Vec2::new(7.0, 10.0));
    assert_eq!(a - b, Vec2::new(3.0, 4.0));
    assert_eq!(b * 4.0, Vec2::new(8.0, 12.0));
    assert_eq!(a / 2.0, Vec2::new(2.5, 3.5));
}

#[test]
fn test_clamp_each_components_independent() {
    let v = Vec2::new(-5.0_f32, 900.0);
    let clamped = v.clamp_each(Vec2::zero(), Vec2::new(640.0, 480.0));
    assert_eq!(clamped, Vec2::new(0.0, 480.0));
}

#[test]
fn test_clamp_each_inverted_range_prefers_lower_bound() {
    let v = Vec2::new(10.0_f32, 10.0);
    let clamped = v.clamp_each(Vec2::zero(), Vec2::new(-20.0, 5.0));
    assert_eq!(clamped, Vec2::new(0.0, 5.0));
}
