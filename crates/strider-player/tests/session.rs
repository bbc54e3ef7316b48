//! End-to-end: TOML scenes on disk, layered config, a scripted walk

use std::path::{Path, PathBuf};
use std::time::Duration;
use strider_player::{Session, StriderConfig};
use strider_runtime::{GameEvent, KeyCode};

const YARD: &str = r#"
[scene]
name = "Yard"

[meshes.floor]
min = [-6, -0.1, -6]
max = [6, 0, 6]

[meshes.deck]
min = [-1, 0, -1]
max = [1, 0.1, 1]

[meshes.wall]
min = [-6, 0, -6.5]
max = [6, 2, -6]

[meshes.branch_01]
position = [3, 0, 3]
size = [2, 0.1, 2]

[meshes.ocean]
min = [-50, -0.5, -50]
max = [50, -0.4, 50]
"#;

const ROOF: &str = r#"
[scene]
name = "Roof"

[meshes.roof]
position = [0, 3, 0]
size = [8, 0.05, 8]
"#;

fn asset_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("strider_session_{}_{}", std::process::id(), name));
    std::fs::create_dir_all(dir.join("scenes")).unwrap();
    std::fs::write(dir.join("scenes/yard.toml"), YARD).unwrap();
    std::fs::write(dir.join("scenes/roof.toml"), ROOF).unwrap();
    dir
}

fn config(root: &Path) -> StriderConfig {
    let mut config = StriderConfig::from_toml_str(
        r#"
[locomotion]
speed = 3.0

[[scenes]]
name = "Yard"
asset_path = "/scenes/yard.toml"

[[scenes]]
name = "Roof"
asset_path = "/scenes/roof.toml"
ground_y_offset = 0.02

[[scenes]]
name = "Missing"
asset_path = "/scenes/missing.glb"
"#,
    )
    .unwrap();
    config.asset_root = Some(root.to_path_buf());
    config
}

#[test]
fn walk_through_scenes() {
    let root = asset_dir("walk");
    let mut session = Session::new(config(&root));

    session.load_scene(0).unwrap();
    assert!(session.wait_for_load(Duration::from_secs(5)));

    let world = session.locomotion().world().unwrap();
    assert_eq!(world.classified.ground.len(), 2);
    // wall and branch_01; the ocean is ignored
    assert_eq!(world.classified.obstacles.len(), 2);

    let spawn = session
        .drain_events()
        .into_iter()
        .find_map(|e| match e {
            GameEvent::SpawnResolved { position, .. } => Some(position),
            _ => None,
        })
        .unwrap();
    assert!(spawn[1].abs() < 1e-5);

    // Strafe for a second along the camera's right; the character stays on
    // the ground
    session.input_mut().process_key_down(KeyCode::KeyD);
    for _ in 0..60 {
        let report = session.step(1.0 / 60.0);
        assert!(report.grounded);
    }
    session.input_mut().process_key_up(KeyCode::KeyD);
    session.step(1.0 / 60.0);
    let pos = session.locomotion().character.position;
    assert!(pos.y >= 0.0 && pos.y <= 0.1 + 1e-5);

    // Next scene: the roof sits at y = 3.05
    session.request_next_scene().unwrap();
    assert!(session.wait_for_load(Duration::from_secs(5)));
    session.step(1.0 / 60.0);
    let pos = session.locomotion().character.position;
    assert!((pos.y - 3.07).abs() < 1e-4);
    assert_eq!(session.transitions().active_index(), 1);

    // A missing asset leaves the roof active and the session usable
    session.request_next_scene().unwrap();
    assert!(session.wait_for_load(Duration::from_secs(5)));
    assert_eq!(session.transitions().active_index(), 1);
    assert!(session
        .drain_events()
        .iter()
        .any(|e| matches!(e, GameEvent::SceneLoadFailed { index: 2, .. })));
    assert!(session.request_previous_scene().is_ok());

    std::fs::remove_dir_all(&root).ok();
}
