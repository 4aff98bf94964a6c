//! Input modality classification (touch-primary vs pointer-primary).
//!
//! Touch-primary requires both a touch capability signal and a mobile user
//! agent, so touch-capable laptops stay on the pointer path. The heuristic
//! sits behind [`DeviceClassifier`] so a feature-detection strategy can
//! replace it without touching gesture logic.

/// Raw capability signals reported by the host.
#[cfg_attr(test, mockall::automock)]
pub trait DeviceSignals {
    /// Host advertises touch input at all.
    fn has_touch_support(&self) -> bool;
    fn max_touch_points(&self) -> u32;
    fn user_agent(&self) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputModality {
    #[default]
    Pointer,
    Touch,
}

pub trait DeviceClassifier {
    fn classify(&self, signals: &dyn DeviceSignals) -> InputModality;
}

const MOBILE_AGENT_MARKERS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Touch capability combined with a mobile user-agent match.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserAgentClassifier;

impl UserAgentClassifier {
    pub fn is_mobile_agent(agent: &str) -> bool {
        let agent = agent.to_ascii_lowercase();
        MOBILE_AGENT_MARKERS
            .iter()
            .any(|marker| agent.contains(marker))
    }
}

impl DeviceClassifier for UserAgentClassifier {
    fn classify(&self, signals: &dyn DeviceSignals) -> InputModality {
        let touch_capable = signals.has_touch_support() || signals.max_touch_points() > 0;
        let mobile_agent = signals
            .user_agent()
            .map_or(false, |agent| Self::is_mobile_agent(&agent));

        if touch_capable && mobile_agent {
            InputModality::Touch
        } else {
            InputModality::Pointer
        }
    }
}

pub struct DeviceDetector {
    classifier: Box<dyn DeviceClassifier>,
    modality: InputModality,
}

impl DeviceDetector {
    pub fn new(signals: &dyn DeviceSignals) -> Self {
        Self::with_classifier(Box::new(UserAgentClassifier), signals)
    }

    pub fn with_classifier(classifier: Box<dyn DeviceClassifier>, signals: &dyn DeviceSignals) -> Self {
        let modality = classifier.classify(signals);
        log::debug!("Input modality detected: {:?}", modality);
        Self {
            classifier,
            modality,
        }
    }

    /// Re-run classification, e.g. after a viewport resize.
    pub fn refresh(&mut self, signals: &dyn DeviceSignals) {
        let modality = self.classifier.classify(signals);
        if modality != self.modality {
            log::info!("Input modality changed: {:?} -> {:?}", self.modality, modality);
            self.modality = modality;
        }
    }

    pub fn modality(&self) -> InputModality {
        self.modality
    }

    pub fn is_touch_primary(&self) -> bool {
        self.modality == InputModality::Touch
    }
}

impl std::fmt::Debug for DeviceDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceDetector")
            .field("modality", &self.modality)
            .finish_non_exhaustive()
    }
}

/// Signals for hosts that expose nothing: always pointer-primary.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDeviceSignals;

impl DeviceSignals for NoDeviceSignals {
    fn has_touch_support(&self) -> bool {
        false
    }

    fn max_touch_points(&self) -> u32 {
        0
    }

    fn user_agent(&self) -> Option<String> {
        None
    }
}
