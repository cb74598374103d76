//! Naming-convention mirroring.
//!
//! Node, module, and socket names carry their side as a leading token
//! (`L_Arm`, `R_Arm_Wrist_jnt`). Mirroring a name swaps that token. Only a
//! leading `L_`/`R_` is touched; interior substrings that happen to contain
//! the tokens (`COL_geo`) are left alone.

const LEFT_TOKEN: &str = "L_";
const RIGHT_TOKEN: &str = "R_";

/// Returns the side-flipped spelling of a name.
///
/// Names that do not start with a side token are returned unchanged, which is
/// what keeps middle-side parent references (e.g. `M_Spine`) stable across a
/// mirror.
pub fn mirror_name(name: &str) -> String {
    if let Some(rest) = name.strip_prefix(LEFT_TOKEN) {
        format!("{}{}", RIGHT_TOKEN, rest)
    } else if let Some(rest) = name.strip_prefix(RIGHT_TOKEN) {
        format!("{}{}", LEFT_TOKEN, rest)
    } else {
        name.to_string()
    }
}

/// Flips an optional name in place, leaving `None` untouched.
pub fn mirror_opt(name: &Option<String>) -> Option<String> {
    name.as_deref().map(mirror_name)
}

/// Flips both sides of a (child, optional parent) name pair list, as used by
/// bind-joint declarations.
pub fn mirror_pairs(pairs: &[(String, Option<String>)]) -> Vec<(String, Option<String>)> {
    pairs
        .iter()
        .map(|(child, parent)| (mirror_name(child), mirror_opt(parent)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_name_flips_prefix() {
        assert_eq!(mirror_name("L_Arm"), "R_Arm");
        assert_eq!(mirror_name("R_Arm"), "L_Arm");
    }

    #[test]
    fn test_mirror_name_leaves_middle_alone() {
        assert_eq!(mirror_name("M_Spine"), "M_Spine");
        assert_eq!(mirror_name("Root"), "Root");
    }

    #[test]
    fn test_mirror_name_ignores_interior_tokens() {
        // Only the leading token is a side marker.
        assert_eq!(mirror_name("COL_geo"), "COL_geo");
        assert_eq!(mirror_name("M_ColL_thing"), "M_ColL_thing");
        assert_eq!(mirror_name("L_Arm_L_extra"), "R_Arm_L_extra");
    }

    #[test]
    fn test_mirror_name_round_trips() {
        for name in ["L_Arm", "R_Leg_01", "M_Spine", "plain"] {
            assert_eq!(mirror_name(&mirror_name(name)), name);
        }
    }

    #[test]
    fn test_mirror_pairs() {
        let pairs = vec![
            ("L_Arm_01_jnt".to_string(), Some("L_Arm_00_jnt".to_string())),
            ("L_Arm_00_jnt".to_string(), None),
        ];
        let flipped = mirror_pairs(&pairs);
        assert_eq!(flipped[0].0, "R_Arm_01_jnt");
        assert_eq!(flipped[0].1.as_deref(), Some("R_Arm_00_jnt"));
        assert_eq!(flipped[1].1, None);
    }
}
