use std::fmt;

/// A position inside a named world. This is what callers use to say where a
/// particle should be displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
  pub world: String,
  pub x:     f64,
  pub y:     f64,
  pub z:     f64,
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "Location({} {} {} {})", self.world, self.x, self.y, self.z)
  }
}

impl Location {
  pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
    Location { world: world.into(), x, y, z }
  }

  /// Returns the block this location is inside of. This floors each axis, so
  /// negative coordinates round away from zero.
  pub fn block(&self) -> BlockPos {
    BlockPos { x: self.x.floor() as i32, y: self.y.floor() as i32, z: self.z.floor() as i32 }
  }

  /// Returns true if the other location is in the same world.
  pub fn same_world(&self, world: &str) -> bool { self.world == world }
}

/// A block position. This is a position that is always aligned to the block
/// grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPos {
  pub x: i32,
  pub y: i32,
  pub z: i32,
}

impl BlockPos {
  #[inline(always)]
  pub fn new(x: i32, y: i32, z: i32) -> Self { BlockPos { x, y, z } }
}

impl fmt::Display for BlockPos {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "BlockPos({} {} {})", self.x, self.y, self.z)
  }
}

/// A free vector. Used for particle offsets, which can be set from one of
/// these in a single call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}

impl Vector {
  #[inline(always)]
  pub fn new(x: f64, y: f64, z: f64) -> Self { Vector { x, y, z } }
}
