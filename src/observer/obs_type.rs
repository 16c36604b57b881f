//! Observation descriptors and the disclosure modes they select.
//!
//! A host asks for a view of the game through an `ObservationType`
//! (public info? perfect recall? whose private info?). Together with the
//! game's imperfect-information flag this resolves to:
//! - a `Disclosure` mode, which picks the string layout
//! - a set of `TensorFields`, which picks the tensor sub-fields to write

/// Whose private information a view contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrivateInfo {
    /// No private information.
    None,
    /// The requesting player's own private information.
    SinglePlayer,
}

/// What a requested view may contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObservationType {
    /// Include information every player sees.
    pub public_info: bool,
    /// Include the full history of the requester's own decisions.
    pub perfect_recall: bool,
    /// Which private information to include.
    pub private_info: PrivateInfo,
}

impl ObservationType {
    /// Default observation: public plus own private info, no recall.
    pub const DEFAULT: Self = Self {
        public_info: true,
        perfect_recall: false,
        private_info: PrivateInfo::SinglePlayer,
    };

    /// Information state: public plus own private info, perfect recall.
    pub const INFO_STATE: Self = Self {
        public_info: true,
        perfect_recall: true,
        private_info: PrivateInfo::SinglePlayer,
    };

    /// Public information only.
    pub const PUBLIC: Self = Self {
        public_info: true,
        perfect_recall: false,
        private_info: PrivateInfo::None,
    };

    /// Own private information only.
    pub const PRIVATE: Self = Self {
        public_info: false,
        perfect_recall: false,
        private_info: PrivateInfo::SinglePlayer,
    };

    fn single_player(self) -> bool {
        self.private_info == PrivateInfo::SinglePlayer
    }
}

impl Default for ObservationType {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// String layout selected for a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Disclosure {
    /// Own action sequence, win sequence, points, terminal flag.
    FullPrivateRecall,
    /// Points, then win sequence.
    PrivateSummary,
    /// Win sequence, then points.
    PublicOnly,
    /// Nothing may be shown.
    Hidden,
}

impl Disclosure {
    /// Pick the layout for a view of a game.
    ///
    /// The two private layouts only exist in imperfect-information games;
    /// every other request with public info falls back to `PublicOnly`.
    #[must_use]
    pub fn resolve(obs_type: ObservationType, imp_info: bool) -> Self {
        match (imp_info && obs_type.single_player(), obs_type.perfect_recall) {
            (true, true) => Disclosure::FullPrivateRecall,
            (true, false) => Disclosure::PrivateSummary,
            (false, _) if obs_type.public_info => Disclosure::PublicOnly,
            (false, _) => Disclosure::Hidden,
        }
    }
}

/// Tensor sub-fields written for a view.
///
/// Fields are laid out in declaration order; absent fields take no space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TensorFields {
    /// Cumulative points, requester first.
    pub point_totals: bool,
    /// One-hot round winner per completed round.
    pub win_sequence: bool,
    /// One-hot own option index per completed round.
    pub action_sequence: bool,
}

impl TensorFields {
    #[must_use]
    pub fn resolve(obs_type: ObservationType, imp_info: bool) -> Self {
        Self {
            point_totals: obs_type.public_info,
            win_sequence: imp_info && obs_type.public_info,
            action_sequence: imp_info && obs_type.perfect_recall && obs_type.single_player(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disclosure_perfect_info_game() {
        // Without imp_info only the public layout exists.
        for obs in [ObservationType::DEFAULT, ObservationType::INFO_STATE, ObservationType::PUBLIC] {
            assert_eq!(Disclosure::resolve(obs, false), Disclosure::PublicOnly);
        }
        assert_eq!(
            Disclosure::resolve(ObservationType::PRIVATE, false),
            Disclosure::Hidden
        );
    }

    #[test]
    fn test_disclosure_imperfect_info_game() {
        assert_eq!(
            Disclosure::resolve(ObservationType::INFO_STATE, true),
            Disclosure::FullPrivateRecall
        );
        assert_eq!(
            Disclosure::resolve(ObservationType::DEFAULT, true),
            Disclosure::PrivateSummary
        );
        assert_eq!(
            Disclosure::resolve(ObservationType::PRIVATE, true),
            Disclosure::PrivateSummary
        );
        assert_eq!(
            Disclosure::resolve(ObservationType::PUBLIC, true),
            Disclosure::PublicOnly
        );
    }

    #[test]
    fn test_tensor_fields() {
        assert_eq!(
            TensorFields::resolve(ObservationType::INFO_STATE, false),
            TensorFields {
                point_totals: true,
                win_sequence: false,
                action_sequence: false,
            }
        );
        assert_eq!(
            TensorFields::resolve(ObservationType::INFO_STATE, true),
            TensorFields {
                point_totals: true,
                win_sequence: true,
                action_sequence: true,
            }
        );
        assert_eq!(
            TensorFields::resolve(ObservationType::DEFAULT, true),
            TensorFields {
                point_totals: true,
                win_sequence: true,
                action_sequence: false,
            }
        );
        assert_eq!(
            TensorFields::resolve(ObservationType::PRIVATE, true),
            TensorFields::default()
        );
    }
}
