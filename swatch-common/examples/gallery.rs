// Copyright 2024 the Swatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render one of each kind of image and save them as PNG files in the
//! current directory.

use swatch_common::*;

fn main() -> Result<(), Error> {
    let mut factory = factory(FactoryConfig::default().with_scale(2.0));
    let blue = Color::rgb8(0x1e, 0x88, 0xe5);

    let button = factory.resizable_image_with_color_and_radius(blue, 8.0)?;
    save_to_file(&factory.stretched_image(&button, (120.0, 36.0))?, "gallery-button@2x.png")?;

    let sky = [Color::rgb8(0x0d, 0x47, 0xa1), Color::rgb8(0x90, 0xca, 0xf9)];
    let gradient =
        factory.image_with_gradient(&sky, (120.0, 80.0), GradientDirection::LeftSlanted)?;
    save_to_file(&gradient, "gallery-gradient@2x.png")?;

    let badge = factory.image_with_color_and_radius(Color::WHITE, (24.0, 24.0), 12.0)?;
    let top_corners = CornerInset::new(12.0, 12.0, 0.0, 0.0);
    let card = factory.image_with_color_and_inset(blue, (64.0, 48.0), top_corners)?;
    let composite = factory.image_adding_image(&card, &badge)?;
    save_to_file(&composite, "gallery-composite@2x.png")?;

    let orange = Color::rgb8(0xff, 0x57, 0x22);
    let ghost = factory.tinted_image(&composite, orange, TintStyle::OverAlphaExtreme)?;
    save_to_file(&ghost, "gallery-tinted@2x.png")?;

    Ok(())
}
