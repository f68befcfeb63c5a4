use rand::Rng;

/// An RGB color. Each channel is stored as a byte, and is converted to a float
/// in `0.0..=1.0` when it is sent to the client.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

impl Color {
  pub const fn new(r: u8, g: u8, b: u8) -> Self { Color { r, g, b } }

  /// Creates a color from integer channels, clamping each one into `0..=255`.
  pub fn clamped(r: i32, g: i32, b: i32) -> Self {
    Color { r: r.clamp(0, 255) as u8, g: g.clamp(0, 255) as u8, b: b.clamp(0, 255) as u8 }
  }

  /// Converts a hue, saturation and brightness into RGB. All three inputs are
  /// in the range `0.0..=1.0`. The hue wraps, so `1.25` is the same as `0.25`.
  pub fn from_hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
    if saturation == 0.0 {
      let v = (brightness * 255.0 + 0.5) as u8;
      return Color::new(v, v, v);
    }
    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));
    let (r, g, b) = match h as u32 {
      0 => (brightness, t, p),
      1 => (q, brightness, p),
      2 => (p, brightness, t),
      3 => (p, q, brightness),
      4 => (t, p, brightness),
      _ => (brightness, p, q),
    };
    Color::new((r * 255.0 + 0.5) as u8, (g * 255.0 + 0.5) as u8, (b * 255.0 + 0.5) as u8)
  }

  /// Returns a fully saturated, fully bright color for the given hue in
  /// degrees.
  pub fn from_hue(hue: u32) -> Self { Color::from_hsb(hue as f32 / 360.0, 1.0, 1.0) }

  /// Returns a random color. With `high_saturation` set, this picks a random
  /// hue at full saturation, which avoids washed out greys.
  pub fn random(high_saturation: bool) -> Self {
    let mut rng = rand::thread_rng();
    if high_saturation {
      Color::from_hue(rng.gen_range(0..=360))
    } else {
      Color::new(rng.gen(), rng.gen(), rng.gen())
    }
  }

  pub fn red(&self) -> f32 { self.r as f32 / 255.0 }
  pub fn green(&self) -> f32 { self.g as f32 / 255.0 }
  pub fn blue(&self) -> f32 { self.b as f32 / 255.0 }
}
