//! Studio Sim - Headless Room Studio Walkthrough
//!
//! Drives the studio editor through a scripted session without a window:
//! drops furniture, drags it across the floor and up a wall, applies
//! keyboard edits and a texture, then prints each frame's snapshot.
//!
//! Run with: `cargo run --bin studio_sim -- [config.json] [layout_out.json]`
//!
//! Set `RUST_LOG=debug` to see every drag update.

use std::path::PathBuf;

use glam::Vec3;

use furnish_engine::camera::Ray;
use furnish_engine::scene::RenderSnapshot;
use furnish_engine::studio::{AssetLibrary, InputEvent, StudioConfig, StudioEditor, StudioEvent};

/// Room-space camera position used for the scripted pointer rays.
const CAMERA_POS: Vec3 = Vec3::new(0.0, 4.0, 4.0);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => StudioConfig::load(&PathBuf::from(path))?,
        None => StudioConfig::default(),
    };
    let layout_out = args.next().map(PathBuf::from);

    let raycast = config.raycast;
    let origin = config.room_origin;
    let mut editor = StudioEditor::new(config, AssetLibrary::builtin())?;
    tracing::info!(room = ?editor.room(), "studio ready");

    // World-space pointer ray from the camera through a room-space point.
    let aim = |target: Vec3| Ray::new(origin + CAMERA_POS, target - CAMERA_POS);

    // Drop a sofa and a chair, slide the chair across the floor.
    editor.queue_input(InputEvent::DropModel {
        asset_id: "sofa".into(),
        uv: (0.3, 0.2),
    });
    editor.queue_input(InputEvent::DropModel {
        asset_id: "chair".into(),
        uv: (0.5, 0.5),
    });
    editor.queue_input(InputEvent::PointerDown {
        ray: aim(Vec3::ZERO),
    });
    for step in 1..=4 {
        let x = step as f32 * 2.0;
        editor.queue_input(InputEvent::PointerMove {
            ray: aim(Vec3::new(x, 0.0, -x)),
        });
    }
    editor.queue_input(InputEvent::PointerUp);
    report(&editor.frame(), &mut editor);

    // Hang the TV on the back wall and nudge it along.
    let tv = editor.drop_model("tv", (0.5, 0.5))?;
    editor.set_position(tv, Vec3::new(0.0, 2.0, -4.9))?;
    let grab = aim(Vec3::new(0.0, 2.0, -5.0));
    editor.begin_drag(tv, &grab)?;
    editor.queue_input(InputEvent::PointerMove {
        ray: aim(Vec3::new(-3.0, 3.5, -5.0)),
    });
    editor.queue_input(InputEvent::PointerMove {
        ray: aim(Vec3::new(-8.0, 9.0, -5.0)),
    });
    editor.queue_input(InputEvent::PointerCancel);
    for key in ["r", "+", "+", "u", "-"] {
        editor.queue_input(InputEvent::Key(key.into()));
    }
    report(&editor.frame(), &mut editor);

    // Paint the floor.
    editor.queue_input(InputEvent::PickTexture {
        texture_id: "wood-oak".into(),
    });
    let floor_ray = raycast.ray(origin + CAMERA_POS, origin, (0.5, 0.3));
    editor.queue_input(InputEvent::TextureHover { ray: floor_ray });
    editor.queue_input(InputEvent::DropTexture { ray: floor_ray });
    report(&editor.frame(), &mut editor);

    if let Some(path) = layout_out {
        editor.layout().save(&path)?;
    }
    Ok(())
}

fn report(snapshot: &RenderSnapshot, editor: &mut StudioEditor) {
    for event in editor.drain_events() {
        match event {
            StudioEvent::TextureApplied { message, .. } => println!("  toast: {message}"),
            StudioEvent::PositionUpdated { .. } => {}
            other => println!("  event: {other:?}"),
        }
    }

    println!(
        "frame {}: {} objects, {} instance bytes",
        snapshot.frame,
        snapshot.instances.len(),
        snapshot.as_bytes().len()
    );
    for id in editor.object_ids() {
        if let (Some(state), Some(surface)) = (editor.object(id), editor.surface_of(id)) {
            println!(
                "  {id} {:<12} on {:<11} at ({:.2}, {:.2}, {:.2}) scale {:.2}",
                state.asset_id,
                surface.display_name(),
                state.position.x,
                state.position.y,
                state.position.z,
                state.scale
            );
        }
    }
    for view in &snapshot.surfaces {
        if let Some(texture) = &view.texture {
            println!("  {} textured with {texture}", view.surface);
        }
    }
}
