use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when textual model values cannot be mapped back to a type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(
    /// Final "when to seek care" level shown to the user.
    UrgencyLevel {
        EmergencyNow => "emergency_now",
        UrgentToday => "urgent_today",
        GpWithin48h => "gp_24_48h",
        Selfcare => "selfcare",
    }
);

impl UrgencyLevel {
    /// Banner label for the presentation layer.
    pub fn label(&self) -> &'static str {
        match self {
            Self::EmergencyNow => "EMERGENCY NOW",
            Self::UrgentToday => "URGENT CARE TODAY",
            Self::GpWithin48h => "GP WITHIN 24–48 HOURS",
            Self::Selfcare => "SELF-CARE / ROUTINE GP",
        }
    }
}

str_enum!(
    /// Outcome tier of the red-flag detector.
    RedFlagLevel {
        EmergencyNow => "emergency_now",
        UrgentToday => "urgent_today",
        NonUrgent => "non_urgent",
    }
);

str_enum!(
    /// Relative likelihood band of a scored condition within one evaluation.
    Band {
        Higher => "higher",
        Medium => "medium",
        Lower => "lower",
    }
);

impl Band {
    /// Ordinal rank, higher is more likely. Used for monotonicity checks.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Higher => 2,
            Self::Medium => 1,
            Self::Lower => 0,
        }
    }
}

str_enum!(
    /// Categorical level for air quality and pollen.
    #[derive(Default)]
    ExposureCategory {
        Low => "low",
        Moderate => "moderate",
        High => "high",
        #[default]
        Unknown => "unknown",
    }
);

str_enum!(
    /// Environmental trigger a condition can declare.
    WeatherLink {
        AqiHigh => "aqi_high",
        PollenHigh => "pollen_high",
        HeatHigh => "heat_high",
        ColdAir => "cold_air",
    }
);

str_enum!(
    /// Unit a temperature was entered in.
    #[derive(Default)]
    TemperatureUnit {
        #[default]
        Celsius => "C",
        Fahrenheit => "F",
    }
);
