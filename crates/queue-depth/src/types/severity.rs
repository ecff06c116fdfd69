use serde::{Deserialize, Serialize};

/// At-a-glance classification of a queue depth.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
  /// Depth 0.
  Ok,
  /// Depth 1-2.
  Low,
  /// Depth 3-5.
  Medium,
  /// Depth 6 and above.
  High,
}

impl SeverityBand {
  pub const ALL: [SeverityBand; 4] = [
    SeverityBand::Ok,
    SeverityBand::Low,
    SeverityBand::Medium,
    SeverityBand::High,
  ];

  pub fn classify(depth: usize) -> Self {
    match depth {
      0 => SeverityBand::Ok,
      1..=2 => SeverityBand::Low,
      3..=5 => SeverityBand::Medium,
      _ => SeverityBand::High,
    }
  }

  pub fn color(&self) -> &'static str {
    match self {
      SeverityBand::Ok => "#00FFFF",
      SeverityBand::Low => "#00FF00",
      SeverityBand::Medium => "#FFFF00",
      SeverityBand::High => "#FF0000",
    }
  }

  pub fn color_name(&self) -> &'static str {
    match self {
      SeverityBand::Ok => "cyan",
      SeverityBand::Low => "green",
      SeverityBand::Medium => "yellow",
      SeverityBand::High => "red",
    }
  }

  /// Legend text for the band.
  pub fn label(&self) -> &'static str {
    match self {
      SeverityBand::Ok => "Depth 0",
      SeverityBand::Low => "Depth 1-2",
      SeverityBand::Medium => "Depth 3-5",
      SeverityBand::High => "Depth 6+",
    }
  }
}

impl ToString for SeverityBand {
  fn to_string(&self) -> String {
    match self {
      SeverityBand::Ok => "ok".to_string(),
      SeverityBand::Low => "low".to_string(),
      SeverityBand::Medium => "medium".to_string(),
      SeverityBand::High => "high".to_string(),
    }
  }
}
