pub mod assets;
pub mod loader;
pub mod physics;
pub mod tile;

use bevy::prelude::*;

use assets::{PhysicsConfigAsset, TileRegistryAsset};
use loader::RonLoader;
use physics::PhysicsConfig;
use tile::TileRegistry;

/// Application state: Loading waits for assets, InGame runs the simulation.
#[derive(States, Default, Debug, Clone, Eq, PartialEq, Hash)]
pub enum AppState {
    #[default]
    Loading,
    InGame,
}

/// Handles for assets being loaded.
#[derive(Resource)]
struct LoadingAssets {
    tiles: Handle<TileRegistryAsset>,
    physics: Handle<PhysicsConfigAsset>,
}

pub struct RegistryPlugin;

impl Plugin for RegistryPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .init_asset::<TileRegistryAsset>()
            .init_asset::<PhysicsConfigAsset>()
            .register_asset_loader(RonLoader::<TileRegistryAsset>::new(&["registry.ron"]))
            .register_asset_loader(RonLoader::<PhysicsConfigAsset>::new(&["config.ron"]))
            .add_systems(Startup, start_loading)
            .add_systems(Update, check_loading.run_if(in_state(AppState::Loading)));
    }
}

fn start_loading(mut commands: Commands, asset_server: Res<AssetServer>) {
    let tiles = asset_server.load::<TileRegistryAsset>("data/tiles.registry.ron");
    let physics = asset_server.load::<PhysicsConfigAsset>("data/physics.config.ron");
    commands.insert_resource(LoadingAssets { tiles, physics });
}

fn check_loading(
    mut commands: Commands,
    loading: Option<Res<LoadingAssets>>,
    tile_assets: Res<Assets<TileRegistryAsset>>,
    physics_assets: Res<Assets<PhysicsConfigAsset>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(loading) = loading else {
        return; // loading gave up
    };
    let (Some(tiles), Some(physics)) = (
        tile_assets.get(&loading.tiles),
        physics_assets.get(&loading.physics),
    ) else {
        return; // not loaded yet
    };

    let registry = match TileRegistry::from_defs(tiles.tiles.clone()) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Invalid tile registry: {e}");
            commands.remove_resource::<LoadingAssets>();
            return;
        }
    };
    info!("Loaded {} tile definitions", registry.len());
    commands.insert_resource(registry);
    commands.insert_resource(PhysicsConfig::from(physics));

    commands.remove_resource::<LoadingAssets>();
    next_state.set(AppState::InGame);
    info!("All registry assets loaded, entering InGame state");
}
