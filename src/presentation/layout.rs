use crate::audio::Channel;
use crate::interview::{Ear, TinnitusProfile, TinnitusType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutId {
    Mono,
    Binaural,
    Uni,
}

/// A selected layout; the ear only matters for [`LayoutId::Uni`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub id: LayoutId,
    pub ear: Option<Ear>,
}

impl Layout {
    /// Channels the audio engine is armed with for this layout
    pub fn channels(&self) -> Vec<Channel> {
        match (self.id, self.ear) {
            (LayoutId::Mono, _) => vec![Channel::Mono],
            (LayoutId::Binaural, _) => vec![Channel::Left, Channel::Right],
            (LayoutId::Uni, Some(Ear::Left)) => vec![Channel::Left],
            (LayoutId::Uni, Some(Ear::Right)) => vec![Channel::Right],
            (LayoutId::Uni, None) => vec![Channel::Mono],
        }
    }
}

pub fn select_layout(profile: &TinnitusProfile) -> Layout {
    let id = match profile.tinnitus_type {
        TinnitusType::BilateralSymmetric => LayoutId::Mono,
        TinnitusType::BilateralAsymmetric => LayoutId::Binaural,
        TinnitusType::Unilateral => LayoutId::Uni,
    };
    let ear = match id {
        LayoutId::Uni => profile.affected_ear,
        _ => None,
    };
    Layout { id, ear }
}

/// Transcript message announcing a loaded layout
pub fn confirmation(layout: &Layout) -> String {
    const TAIL: &str = "You can now use the controls to manage your symptoms.";
    match (layout.id, layout.ear) {
        (LayoutId::Mono, _) => {
            format!("I've loaded the bilateral symmetric tinnitus interface. {}", TAIL)
        }
        (LayoutId::Binaural, _) => {
            format!("I've loaded the bilateral asymmetric tinnitus interface. {}", TAIL)
        }
        (LayoutId::Uni, Some(ear)) => format!(
            "I've loaded the unilateral tinnitus interface for your {} ear. {}",
            ear, TAIL
        ),
        (LayoutId::Uni, None) => {
            format!("I've loaded the unilateral tinnitus interface. {}", TAIL)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(tinnitus_type: TinnitusType, affected_ear: Option<Ear>) -> TinnitusProfile {
        TinnitusProfile {
            tinnitus_type,
            affected_ear,
        }
    }

    #[test]
    fn test_type_to_layout() {
        assert_eq!(
            select_layout(&profile(TinnitusType::BilateralSymmetric, None)).id,
            LayoutId::Mono
        );
        assert_eq!(
            select_layout(&profile(TinnitusType::BilateralAsymmetric, None)).id,
            LayoutId::Binaural
        );
        let uni = select_layout(&profile(TinnitusType::Unilateral, Some(Ear::Left)));
        assert_eq!(uni, Layout { id: LayoutId::Uni, ear: Some(Ear::Left) });
    }

    #[test]
    fn test_channels_per_layout() {
        assert_eq!(Layout { id: LayoutId::Mono, ear: None }.channels(), vec![Channel::Mono]);
        assert_eq!(
            Layout { id: LayoutId::Binaural, ear: None }.channels(),
            vec![Channel::Left, Channel::Right]
        );
        assert_eq!(
            Layout { id: LayoutId::Uni, ear: Some(Ear::Right) }.channels(),
            vec![Channel::Right]
        );
    }

    #[test]
    fn test_confirmation_names_ear() {
        let text = confirmation(&Layout { id: LayoutId::Uni, ear: Some(Ear::Left) });
        assert_eq!(
            text,
            "I've loaded the unilateral tinnitus interface for your left ear. You can now use the controls to manage your symptoms."
        );
        assert!(confirmation(&Layout { id: LayoutId::Binaural, ear: None }).contains("bilateral asymmetric"));
    }
}
