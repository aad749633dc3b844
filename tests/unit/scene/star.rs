use super::*;

fn star(speed: f64, angle: f64, trail_length: u32) -> ShootingStar {
    ShootingStar::new(StarParams {
        head_position: Point::new(10.0, 20.0),
        gradient: Gradient::new(
            Rgb8::new(255, 0, 0),
            Rgb8::new(0, 255, 0),
            Rgb8::new(0, 0, 255),
        ),
        trail_length,
        trail_angle: angle,
        speed,
        head_size: 6.0,
        trail_width: 4.0,
        loop_frames: 100,
    })
}

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn head_color_is_first_gradient_stop() {
    let s = star(10.0, 45.0, 5);
    assert_eq!(s.head_color, Rgb8::new(255, 0, 0));
}

#[test]
fn velocity_follows_angle_and_speed() {
    let s = star(10.0, 90.0, 5);
    assert!(s.velocity().x.abs() < 1e-9);
    assert!((s.velocity().y - 10.0).abs() < 1e-9);

    let s = star(2.0, 0.0, 5);
    assert!((s.velocity().x - 2.0).abs() < 1e-12);
}

#[test]
fn tail_is_head_minus_trail_length_times_velocity() {
    for (speed, angle, len) in [(15.0, 45.0, 50), (3.5, 200.0, 7), (0.0, 30.0, 1)] {
        let s = star(speed, angle, len);
        let a = f64::to_radians(angle);
        let expected = Point::new(
            s.head_position.x - f64::from(len) * speed * a.cos(),
            s.head_position.y - f64::from(len) * speed * a.sin(),
        );
        assert!(close(s.tail_position(), expected));
        assert!(close(s.trail_point(len), expected));
    }
}

#[test]
fn n_advances_translate_by_n_velocities() {
    let mut s = star(7.0, 30.0, 3);
    let start = s.head_position;
    let v = s.velocity();
    for _ in 0..12 {
        assert_eq!(s.advance(), v);
    }
    assert!(close(s.head_position, start + v * 12.0));
}

#[test]
fn zero_speed_never_moves() {
    let mut s = star(0.0, 45.0, 1);
    let start = s.head_position;
    for _ in 0..5 {
        s.advance();
    }
    assert_eq!(s.head_position, start);
    assert_eq!(s.tail_position(), start);
}

#[test]
fn out_of_bounds_checks_right_and_bottom_only() {
    let mut s = star(1.0, 0.0, 0);
    s.reset_to(Point::new(101.0, 50.0));
    assert!(s.is_past(100, 100));
    s.reset_to(Point::new(50.0, 100.5));
    assert!(s.is_past(100, 100));
    s.reset_to(Point::new(-500.0, -500.0));
    assert!(!s.is_past(100, 100));
    s.reset_to(Point::new(100.0, 100.0));
    assert!(!s.is_past(100, 100));
}

#[test]
fn reset_keeps_kinematics_and_colors() {
    let mut s = star(4.0, 60.0, 9);
    let before = s.clone();
    s.advance();
    s.reset_to(Point::new(-3.0, -4.0));
    assert_eq!(s.head_position, Point::new(-3.0, -4.0));
    assert_eq!(s.velocity(), before.velocity());
    assert_eq!(s.gradient, before.gradient);
    assert_eq!(s.speed, before.speed);
}

#[test]
fn max_distance_covers_loop_and_trail() {
    let s = star(2.0, 0.0, 10);
    let (dx, dy) = s.max_distance;
    assert!((dx - (2.0 * 100.0 + 10.0)).abs() < 1e-9);
    assert!(dy.abs() < 1e-9);
}
