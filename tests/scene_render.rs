use robust_spn_anim::config::RenderConfig;
use robust_spn_anim::palette::{BLACK, BLUE_B, GREY_E};
use robust_spn_anim::storyboard::{die_faces_scene, intro_row_scene, intro_scene};
use robust_spn_anim::Point;
use std::time::Duration;

fn config() -> RenderConfig {
    RenderConfig {
        resolution: Point::new(256, 144),
        ..Default::default()
    }
}

#[test]
fn still_is_written_with_background() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("dice.png");
    let scene = die_faces_scene(&config(), vec![1, 2, 3, 4, 5, 6]).unwrap();
    scene.render_still(Duration::ZERO, &path).unwrap();

    let image = image::open(&path).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (256, 144));
    assert_eq!(image.get_pixel(0, 0).0, [BLACK.0[0], BLACK.0[1], BLACK.0[2]]);
    let colors = image.pixels().map(|p| p.0).collect::<Vec<_>>();
    assert!(colors.contains(&[BLUE_B.0[0], BLUE_B.0[1], BLUE_B.0[2]]));
    assert!(colors.contains(&[GREY_E.0[0], GREY_E.0[1], GREY_E.0[2]]));
}

#[test]
fn intro_pips_start_spread_and_end_coalesced() {
    // six 20px faces across the middle of the frame
    let scene = intro_scene(&RenderConfig {
        resolution: Point::new(256, 144),
        ..Default::default()
    })
    .unwrap();
    let blue_pixels = |time: Duration| {
        scene
            .render_frame(time)
            .unwrap()
            .pixels()
            .filter(|p| p.0[..3] == BLUE_B.0[..3] && p.0[3] == 255)
            .count()
    };
    // spread corner and edge pips are cut by the face's bounds
    let spread = blue_pixels(Duration::from_millis(1000));
    let coalesced = blue_pixels(Duration::from_millis(2500));
    assert!(coalesced > spread);
}

#[test]
fn animated_stills_depend_on_time() {
    let dir = tempfile::tempdir().unwrap();
    let scene = intro_row_scene(&config(), vec![2, 5]).unwrap();
    let still = |millis: u64| {
        let path = dir.path().join(format!("still_{millis}.png"));
        scene.render_still(Duration::from_millis(millis), &path).unwrap();
        image::open(&path).unwrap().to_rgb8()
    };
    let faded = still(500);
    let spread = still(1000);
    let coalesced = still(2500);
    assert_ne!(faded, spread);
    assert_ne!(spread, coalesced);
    assert_eq!(coalesced, still(3000));
}
