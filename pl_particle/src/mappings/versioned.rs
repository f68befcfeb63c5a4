use pl_common::Version;

/// Picks a value based on the detected version. Each call to
/// [`since`](Self::since) adds a gate, and the value for the highest gate that
/// is not newer than the detected version wins. Gates can be added in any
/// order.
///
/// ```
/// # use pl_particle::mappings::Versioned;
/// # use pl_common::Version;
/// let name = Versioned::new(Version::new(18, 2))
///   .since(Version::V1_17, "b")
///   .since(Version::V1_20, "c")
///   .or_else("playerConnection");
/// assert_eq!(name, "b");
/// ```
#[derive(Debug, Clone)]
pub struct Versioned<T> {
  ver:  Version,
  best: Option<(Version, T)>,
}

impl<T> Versioned<T> {
  pub fn new(ver: Version) -> Self { Versioned { ver, best: None } }

  /// Uses `value` for every version from `gate` on, unless a higher gate also
  /// matches.
  pub fn since(mut self, gate: Version, value: T) -> Self {
    if gate <= self.ver && self.best.as_ref().map(|(g, _)| gate > *g).unwrap_or(true) {
      self.best = Some((gate, value));
    }
    self
  }

  /// Returns the matched value, or `value` if no gate matched.
  pub fn or_else(self, value: T) -> T { self.get().unwrap_or(value) }

  /// Returns the matched value, if any gate matched.
  pub fn get(self) -> Option<T> { self.best.map(|(_, v)| v) }
}
