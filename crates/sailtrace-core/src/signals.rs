//! Signal dictionary
//!
//! Maps single-character wire codes to named boat signals. The engine
//! itself never fixes the set of codes; the dictionary is what the
//! relational-sink and export adapters use to give columns and labels
//! human-readable names. Unknown codes are an explicit lookup miss, not
//! a silent fallthrough.

use std::collections::BTreeMap;

/// Description of one boat signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalInfo {
    /// Property / column name for the signal
    pub name: &'static str,
    /// Unit of measure, for display purposes
    pub unit: &'static str,
}

/// Dictionary of known signal codes.
#[derive(Debug, Clone, Default)]
pub struct SignalDictionary {
    entries: BTreeMap<char, SignalInfo>,
}

impl SignalDictionary {
    /// Empty dictionary; codes can be registered with [`SignalDictionary::register`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock dictionary for the boat's firmware signals.
    pub fn boat_defaults() -> Self {
        let mut dict = Self::new();
        for (code, name, unit) in [
            ('A', "bat_absorption", "µA"),
            ('B', "bat_timeleft", "s"),
            ('D', "hdop", "-"),
            ('F', "speed", "m/s"),
            ('H', "desired_heading", "°"),
            ('N', "north", "°"),
            ('P', "pilot_mode", "CODE"),
            ('R', "rudder_position", "%"),
            ('S', "sail_position", "%"),
            ('T', "last_msg_millis", "ms"),
            ('W', "relative_wind", "°"),
            ('I', "log_signal_interval", "ms"),
            ('X', "longitude", "°"),
            ('Y', "latitude", "°"),
        ] {
            dict.register(code, SignalInfo { name, unit });
        }
        dict
    }

    /// Register or replace a signal code.
    pub fn register(&mut self, code: char, info: SignalInfo) {
        self.entries.insert(code, info);
    }

    /// Look up a code; `None` means the code is unknown to this dictionary.
    pub fn lookup(&self, code: char) -> Option<&SignalInfo> {
        self.entries.get(&code)
    }

    /// Iterate over all known codes in code order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &SignalInfo)> {
        self.entries.iter().map(|(c, i)| (*c, i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_position_codes() {
        let dict = SignalDictionary::boat_defaults();
        assert_eq!(dict.lookup('X').unwrap().name, "longitude");
        assert_eq!(dict.lookup('Y').unwrap().name, "latitude");
        assert_eq!(dict.lookup('D').unwrap().name, "hdop");
    }

    #[test]
    fn test_unknown_code_is_explicit() {
        let dict = SignalDictionary::boat_defaults();
        assert!(dict.lookup('Z').is_none());
    }

    #[test]
    fn test_register_overrides() {
        let mut dict = SignalDictionary::new();
        dict.register('Q', SignalInfo { name: "custom", unit: "-" });
        assert_eq!(dict.lookup('Q').unwrap().name, "custom");
    }
}
