//! Depot: runs the depot explorer against the configured storage.

use bevy::prelude::AppExit;
use depot_explorer::prelude::*;

fn main() -> AppExit {
    let _ = dotenvy::dotenv();
    DepotExplorerBuilder::new().env_config().build().run()
}
