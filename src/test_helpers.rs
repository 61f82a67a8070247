pub mod fixtures {
    use bevy::prelude::*;
    use bevy::state::app::StatesPlugin;

    use crate::physics::PhysicsPlugin;
    use crate::registry::AppState;
    use crate::registry::physics::PhysicsConfig;
    use crate::registry::tile::{TileDef, TileId, TileRegistry};
    use crate::world::ctx::WorldCtxRef;
    use crate::world::layer::TileLayer;
    use crate::world::tile::{SlopeKind, TileKind};

    pub fn test_tile_registry() -> TileRegistry {
        let def = |id: &str, kind| TileDef {
            id: id.into(),
            kind,
        };
        TileRegistry::from_defs(vec![
            def("air", TileKind::Air),
            def("solid", TileKind::Solid),
            def("platform", TileKind::Platform),
            def("slope_right_floor", TileKind::Slope(SlopeKind::RightFloor)),
            def("slope_left_floor", TileKind::Slope(SlopeKind::LeftFloor)),
            def("slope_right_ceiling", TileKind::Slope(SlopeKind::RightCeiling)),
            def("slope_left_ceiling", TileKind::Slope(SlopeKind::LeftCeiling)),
        ])
        .unwrap()
    }

    /// Build a layer from ASCII rows, top row first.
    ///
    /// `.` air, `#` solid, `=` platform, `r`/`l` right/left floor ramps,
    /// `R`/`L` right/left ceiling ramps.
    pub fn level(rows: &[&str]) -> TileLayer {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let mut layer = TileLayer::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len() as u32, width, "ragged level row {y}");
            for (x, c) in row.chars().enumerate() {
                let id = match c {
                    '.' => TileId::AIR,
                    '#' => TileId::SOLID,
                    '=' => TileId(2),
                    'r' => TileId(3),
                    'l' => TileId(4),
                    'R' => TileId(5),
                    'L' => TileId(6),
                    other => panic!("unknown level char {other:?}"),
                };
                layer.set_tile(x as i32, y as i32, id);
            }
        }
        layer
    }

    pub fn test_physics_config() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    /// Owns everything a [`WorldCtxRef`] borrows.
    pub struct TestWorld {
        pub layer: TileLayer,
        pub registry: TileRegistry,
        pub config: PhysicsConfig,
    }

    impl TestWorld {
        pub fn new(rows: &[&str]) -> Self {
            Self {
                layer: level(rows),
                registry: test_tile_registry(),
                config: test_physics_config(),
            }
        }

        pub fn ctx(&self) -> WorldCtxRef<'_> {
            WorldCtxRef {
                layer: &self.layer,
                registry: &self.registry,
                config: &self.config,
            }
        }
    }

    #[track_caller]
    pub fn assert_near(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    /// Minimal app already in `InGame` with the physics systems and the
    /// given level loaded.
    pub fn test_app(rows: &[&str]) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.insert_state(AppState::InGame);
        app.insert_resource(level(rows));
        app.insert_resource(test_tile_registry());
        app.insert_resource(test_physics_config());
        app.add_plugins(PhysicsPlugin);
        app
    }
}
