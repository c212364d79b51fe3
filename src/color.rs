/// RGBA color, components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    // Part palette.
    pub const CYAN: Color = Color::rgb(0.7, 1.0, 1.0);
    pub const MAGENTA: Color = Color::rgb(0.8, 0.7, 0.8);
    pub const DESERT_YELLOW: Color = Color::rgb(0.847059, 0.847059, 0.77902);
    pub const DARK_DESERT_YELLOW: Color = Color::rgb(0.6, 0.6, 0.6);
    pub const PURPLE: Color = Color::rgb(0.75, 0.78, 0.99);
    pub const DARK_PURPLE: Color = Color::rgb(0.64, 0.65, 0.84);
    pub const PINK: Color = Color::rgb(0.8, 0.7, 0.8);

    /// Background behind the floor.
    pub const SKY: Color = Color::rgb(0.5, 0.5, 0.6);
}
