//! Scene, hands and props: hold "fire point" for three seconds to fire the laser

use hands_app::{laser_script, run, DemoArgs};
use vr_hands::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run(
        "laser demo",
        AppFeatures::HANDS | AppFeatures::PROPS,
        laser_script,
        DemoArgs::from_env(),
    )?;
    Ok(())
}
