//! Golf course metadata used to auto-populate par and yardage.

use serde::{Deserialize, Serialize};

use super::CourseId;

/// One hole on a tee set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseHole {
    pub hole_number: u8,
    pub par: u8,

    #[serde(default)]
    pub yardage: u32,

    #[serde(default)]
    pub handicap: Option<u8>,
}

/// A tee set on a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseTee {
    #[serde(default)]
    pub id: Option<i64>,

    pub tee_name: String,

    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default)]
    pub course_rating: Option<f64>,

    #[serde(default)]
    pub slope_rating: Option<f64>,

    #[serde(default)]
    pub total_yards: Option<u32>,

    #[serde(default)]
    pub par_total: Option<u32>,

    #[serde(default)]
    pub holes: Vec<CourseHole>,
}

impl CourseTee {
    /// Look up a hole by number.
    pub fn hole(&self, hole_number: u8) -> Option<&CourseHole> {
        self.holes.iter().find(|h| h.hole_number == hole_number)
    }

    /// Par total, falling back to the sum of hole pars.
    pub fn par(&self) -> u32 {
        self.par_total
            .unwrap_or_else(|| self.holes.iter().map(|h| u32::from(h.par)).sum())
    }
}

/// A golf course with its tee sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GolfCourse {
    pub id: CourseId,

    #[serde(default)]
    pub api_id: Option<i64>,

    #[serde(default)]
    pub club_name: String,

    #[serde(default)]
    pub course_name: String,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub tees: Vec<CourseTee>,
}

impl GolfCourse {
    /// "Club - Course", or whichever part is present.
    pub fn display_name(&self) -> String {
        display_name(&self.club_name, &self.course_name)
    }

    /// Find a tee set by name (case-insensitive).
    pub fn tee(&self, name: &str) -> Option<&CourseTee> {
        self.tees
            .iter()
            .find(|t| t.tee_name.eq_ignore_ascii_case(name))
    }
}

/// Course search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSearchResult {
    pub id: CourseId,

    #[serde(default)]
    pub club_name: String,

    #[serde(default)]
    pub course_name: String,

    #[serde(default)]
    pub location: Option<CourseLocation>,
}

impl CourseSearchResult {
    pub fn display_name(&self) -> String {
        display_name(&self.club_name, &self.course_name)
    }
}

/// Location block of a course search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseLocation {
    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub state: Option<String>,
}

fn display_name(club: &str, course: &str) -> String {
    match (club.trim(), course.trim()) {
        ("", "") => "Unknown course".to_string(),
        (club, "") => club.to_string(),
        ("", course) => course.to_string(),
        (club, course) if club.eq_ignore_ascii_case(course) => club.to_string(),
        (club, course) => format!("{club} - {course}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tee() -> CourseTee {
        CourseTee {
            id: Some(1),
            tee_name: "White".to_string(),
            gender: None,
            course_rating: Some(70.1),
            slope_rating: Some(121.0),
            total_yards: None,
            par_total: None,
            holes: vec![
                CourseHole {
                    hole_number: 1,
                    par: 4,
                    yardage: 350,
                    handicap: None,
                },
                CourseHole {
                    hole_number: 2,
                    par: 5,
                    yardage: 510,
                    handicap: None,
                },
            ],
        }
    }

    #[test]
    fn test_tee_par_falls_back_to_hole_sum() {
        assert_eq!(tee().par(), 9);
        let with_total = CourseTee {
            par_total: Some(72),
            ..tee()
        };
        assert_eq!(with_total.par(), 72);
    }

    #[test]
    fn test_tee_hole_lookup() {
        assert_eq!(tee().hole(2).map(|h| h.par), Some(5));
        assert!(tee().hole(3).is_none());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("Pine Hills", "North"), "Pine Hills - North");
        assert_eq!(display_name("Pine Hills", "pine hills"), "Pine Hills");
        assert_eq!(display_name("", "North"), "North");
        assert_eq!(display_name(" ", ""), "Unknown course");
    }

    #[test]
    fn test_course_deserialize_sparse_payload() {
        let course: GolfCourse =
            serde_json::from_str(r#"{"id": 4, "club_name": "Muni"}"#).unwrap();
        assert_eq!(course.display_name(), "Muni");
        assert!(course.tees.is_empty());
    }
}
