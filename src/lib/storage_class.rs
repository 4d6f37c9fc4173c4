use std::fmt;
use std::str::FromStr;

/// S3 storage classes as documented in https://aws.amazon.com/s3/storage-classes/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageClass {
    Standard,          // S3 Standard
    StandardIa,        // S3 Standard-Infrequent Access
    StandardIaOneZone, // S3 One Zone-Infrequent Access
    Glacier,           // S3 Glacier Flexible Retrieval
    GlacierDeepArchive, // S3 Glacier Deep Archive
}

impl StorageClass {
    /// Classes objects may be written to before any lifecycle rule applies
    pub const STARTING: [StorageClass; 3] = [
        StorageClass::Standard,
        StorageClass::StandardIa,
        StorageClass::StandardIaOneZone,
    ];

    /// Classes a lifecycle rule may transition objects into
    pub const TARGETS: [StorageClass; 4] = [
        StorageClass::StandardIa,
        StorageClass::StandardIaOneZone,
        StorageClass::Glacier,
        StorageClass::GlacierDeepArchive,
    ];

    pub const ALL: [StorageClass; 5] = [
        StorageClass::Standard,
        StorageClass::StandardIa,
        StorageClass::StandardIaOneZone,
        StorageClass::Glacier,
        StorageClass::GlacierDeepArchive,
    ];

    /// Pricing table key for this class
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageClass::Standard => "standard",
            StorageClass::StandardIa => "standard_ia",
            StorageClass::StandardIaOneZone => "standard_ia_one_zone",
            StorageClass::Glacier => "glacier",
            StorageClass::GlacierDeepArchive => "glacier_deep_archive",
        }
    }

    pub fn is_starting(&self) -> bool {
        Self::STARTING.contains(self)
    }

    pub fn is_target(&self) -> bool {
        Self::TARGETS.contains(self)
    }

    /// Parse a class that objects may start in
    pub fn parse_starting(s: &str) -> Result<Self, String> {
        let class: StorageClass = s.parse()?;
        if class.is_starting() {
            Ok(class)
        } else {
            Err(format!(
                "'{}' cannot be used as a starting storage class. Choose one of: {}",
                s,
                join_names(&Self::STARTING)
            ))
        }
    }

    /// Parse a class that objects may transition into
    pub fn parse_target(s: &str) -> Result<Self, String> {
        let class: StorageClass = s.parse()?;
        if class.is_target() {
            Ok(class)
        } else {
            Err(format!(
                "'{}' cannot be used as a target storage class. Choose one of: {}",
                s,
                join_names(&Self::TARGETS)
            ))
        }
    }
}

fn join_names(classes: &[StorageClass]) -> String {
    classes
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StorageClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(StorageClass::Standard),
            "standard_ia" => Ok(StorageClass::StandardIa),
            "standard_ia_one_zone" => Ok(StorageClass::StandardIaOneZone),
            "glacier" => Ok(StorageClass::Glacier),
            "glacier_deep_archive" => Ok(StorageClass::GlacierDeepArchive),
            _ => Err(format!(
                "Invalid storage class: '{}'. Valid classes are: {}",
                s,
                join_names(&Self::ALL)
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_pricing_key() {
        for class in StorageClass::ALL {
            assert_eq!(class.as_str().parse::<StorageClass>(), Ok(class));
        }
    }

    #[test]
    fn test_unknown_class_lists_choices() {
        let err = "nonexistent".parse::<StorageClass>().unwrap_err();
        assert!(err.contains("nonexistent"));
        assert!(err.contains("glacier_deep_archive"));
    }

    #[test]
    fn test_glacier_cannot_be_a_starting_class() {
        assert!(StorageClass::parse_starting("glacier").is_err());
        assert_eq!(
            StorageClass::parse_starting("standard_ia"),
            Ok(StorageClass::StandardIa)
        );
    }

    #[test]
    fn test_standard_cannot_be_a_target_class() {
        assert!(StorageClass::parse_target("standard").is_err());
        assert_eq!(
            StorageClass::parse_target("glacier_deep_archive"),
            Ok(StorageClass::GlacierDeepArchive)
        );
    }
}
