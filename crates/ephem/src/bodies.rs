use crate::EphemerisError;

/// Bodies the viewer knows how to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Body {
    Sun,
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Body {
    /// Every body, Sun first, in order of distance.
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Mercury,
        Body::Venus,
        Body::Earth,
        Body::Moon,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    /// The planets the orbital feed tracks with trails.
    pub const PLANETS: [Body; 8] = [
        Body::Mercury,
        Body::Venus,
        Body::Earth,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    /// Display name, also used as the scene object name in lowercase.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Earth => "Earth",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
        }
    }

    /// Resolve a body from a case-insensitive name.
    pub fn from_name(name: &str) -> Result<Body, EphemerisError> {
        Body::ALL
            .into_iter()
            .find(|body| body.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| EphemerisError::UnknownBody(name.to_string()))
    }

    /// Catalog entry for this body.
    pub fn descriptor(self) -> &'static BodyDescriptor {
        // Every variant has exactly one catalog row.
        BODY_CATALOG
            .iter()
            .find(|d| d.body == self)
            .unwrap_or(&BODY_CATALOG[0])
    }
}

/// Drawing metadata for a body.
///
/// `semi_major_axis_au` only sizes the reference ring drawn around the Sun; positions
/// always come from the ephemeris provider.
#[derive(Debug, Clone, Copy)]
pub struct BodyDescriptor {
    pub body: Body,
    /// Sphere radius in scene units (1 unit = 1 AU), exaggerated for visibility.
    pub display_radius: f64,
    pub semi_major_axis_au: f64,
    pub description: &'static str,
}

/// Canonical body set drawn by the viewer.
pub const BODY_CATALOG: &[BodyDescriptor] = &[
    BodyDescriptor {
        body: Body::Sun,
        display_radius: 0.15,
        semi_major_axis_au: 0.0,
        description: "G2V star at the origin of the heliocentric scene.",
    },
    BodyDescriptor {
        body: Body::Mercury,
        display_radius: 0.02,
        semi_major_axis_au: 0.387,
        description: "Innermost planet; the most eccentric orbit of the eight.",
    },
    BodyDescriptor {
        body: Body::Venus,
        display_radius: 0.035,
        semi_major_axis_au: 0.723,
        description: "Near-circular orbit inside Earth's.",
    },
    BodyDescriptor {
        body: Body::Earth,
        display_radius: 0.04,
        semi_major_axis_au: 1.0,
        description: "Home planet; defines the AU scene scale.",
    },
    BodyDescriptor {
        body: Body::Moon,
        display_radius: 0.012,
        semi_major_axis_au: 0.002_57,
        description: "Drawn at an exaggerated geocentric distance so it separates from Earth.",
    },
    BodyDescriptor {
        body: Body::Mars,
        display_radius: 0.03,
        semi_major_axis_au: 1.524,
        description: "Outermost terrestrial planet.",
    },
    BodyDescriptor {
        body: Body::Jupiter,
        display_radius: 0.12,
        semi_major_axis_au: 5.203,
        description: "Gas giant; largest planet.",
    },
    BodyDescriptor {
        body: Body::Saturn,
        display_radius: 0.1,
        semi_major_axis_au: 9.537,
        description: "Ringed gas giant.",
    },
    BodyDescriptor {
        body: Body::Uranus,
        display_radius: 0.07,
        semi_major_axis_au: 19.19,
        description: "Ice giant tipped on its side.",
    },
    BodyDescriptor {
        body: Body::Neptune,
        display_radius: 0.07,
        semi_major_axis_au: 30.07,
        description: "Outermost planet.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_body_has_a_catalog_row() {
        for body in Body::ALL {
            assert_eq!(body.descriptor().body, body);
        }
    }

    #[test]
    fn names_resolve_case_insensitively() {
        assert_eq!(Body::from_name("jupiter").unwrap(), Body::Jupiter);
        assert_eq!(Body::from_name(" MOON ").unwrap(), Body::Moon);
        assert!(Body::from_name("Pluto").is_err());
    }
}
