//! Turning an answer into the options it selects.

use log::debug;
use regex::RegexBuilder;

use super::types::Candidate;
use crate::slug::slug;

/// Compiled-size cap for user-typed expressions. Anything bigger is treated
/// as malformed.
pub const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// Resolves `answer` against `candidates`, returning positions in
/// `candidates`.
///
/// Visible candidates must come first; their 1-based position is the number
/// shown in the option table. In priority order:
///
/// 1. a number in range selects that option;
/// 2. with `multiple`, a case-insensitive regular expression selects every
///    visible option whose names, number or command token match (`*` alone
///    means everything), plus any hidden option whose command token is
///    exactly the answer;
/// 3. otherwise an exact, case-insensitive command token selects its option,
///    hidden ones included;
/// 4. otherwise the answer's slug must prefix a name's slug of exactly one
///    visible option.
///
/// An empty result means no match.
#[must_use]
pub fn resolve(candidates: &[Candidate], answer: &str, multiple: bool) -> Vec<usize> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Vec::new();
    }

    let visible = candidates.iter().take_while(|c| !c.hidden).count();

    if answer.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(number) = answer.parse::<usize>() {
            if (1..=visible).contains(&number) {
                return vec![number - 1];
            }
        }
    }

    let lowered = answer.to_lowercase();

    if multiple {
        let mut positions = resolve_pattern(&candidates[..visible], answer);
        positions.extend(
            candidates
                .iter()
                .enumerate()
                .skip(visible)
                .filter(|(_, c)| c.command.to_lowercase() == lowered)
                .map(|(position, _)| position),
        );
        return positions;
    }

    if let Some(position) = candidates
        .iter()
        .position(|c| c.command.to_lowercase() == lowered)
    {
        return vec![position];
    }

    let prefix = slug(answer);
    let matches: Vec<usize> = candidates[..visible]
        .iter()
        .enumerate()
        .filter(|(_, c)| c.names.iter().any(|name| slug(name).starts_with(&prefix)))
        .map(|(position, _)| position)
        .collect();

    if matches.len() == 1 {
        matches
    } else {
        Vec::new()
    }
}

fn resolve_pattern(visible: &[Candidate], answer: &str) -> Vec<usize> {
    let pattern = if answer == "*" { ".*" } else { answer };

    let regex = match RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
    {
        Ok(regex) => regex,
        Err(e) => {
            debug!("Answer `{answer}` is not a usable expression: {e}");
            return Vec::new();
        }
    };

    visible
        .iter()
        .enumerate()
        .filter(|(position, c)| {
            c.names.iter().any(|name| regex.is_match(name))
                || regex.is_match(&(position + 1).to_string())
                || regex.is_match(&c.command)
        })
        .map(|(position, _)| position)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(index: usize, name: &str, command: &str, hidden: bool) -> Candidate {
        Candidate {
            index,
            name: name.to_string(),
            names: vec![name.to_string()],
            command: command.to_string(),
            hidden,
        }
    }

    fn greek() -> Vec<Candidate> {
        vec![
            candidate(0, "Alpha", "Alpha", false),
            candidate(1, "Beta", "Beta", false),
            candidate(2, "Gamma", "Gamma", false),
        ]
    }

    #[test]
    fn test_number_selects_option() {
        assert_eq!(resolve(&greek(), "2", false), vec![1]);
        assert_eq!(resolve(&greek(), " 3 ", true), vec![2]);
    }

    #[test]
    fn test_number_out_of_range() {
        assert!(resolve(&greek(), "0", false).is_empty());
        assert!(resolve(&greek(), "4", false).is_empty());
        assert!(resolve(&greek(), "99999999999999999999999", false).is_empty());
    }

    #[test]
    fn test_blank_selects_nothing() {
        assert!(resolve(&greek(), "", false).is_empty());
        assert!(resolve(&greek(), "   ", true).is_empty());
    }

    #[test]
    fn test_prefix_must_be_unique() {
        assert_eq!(resolve(&greek(), "al", false), vec![0]);
        assert_eq!(resolve(&greek(), "GAM", false), vec![2]);

        let mut options = greek();
        options.push(candidate(3, "Alpine", "Alpine", false));
        assert!(resolve(&options, "al", false).is_empty());
        assert_eq!(resolve(&options, "alph", false), vec![0]);
    }

    #[test]
    fn test_prefix_ignores_accents_and_spaces() {
        let options = vec![
            candidate(0, "Configuração geral", "Configuração geral", false),
            candidate(1, "Sair", "Sair", false),
        ];
        assert_eq!(resolve(&options, "configuracao g", false), vec![0]);
    }

    #[test]
    fn test_unmatched_answer() {
        assert!(resolve(&greek(), "zz", false).is_empty());
    }

    #[test]
    fn test_command_token_wins() {
        let options = vec![
            candidate(0, "Alpha", "b", false),
            candidate(1, "Beta", "Beta", false),
        ];
        assert_eq!(resolve(&options, "B", false), vec![0]);
    }

    #[test]
    fn test_hidden_only_by_command_token() {
        let mut options = greek();
        options.push(candidate(3, "About", "about", true));

        assert_eq!(resolve(&options, "ABOUT", false), vec![3]);
        assert!(resolve(&options, "abo", false).is_empty());
        assert!(resolve(&options, "4", false).is_empty());
        assert!(!resolve(&options, "*", true).contains(&3));
        assert!(!resolve(&options, "abo.*", true).contains(&3));
    }

    #[test]
    fn test_hidden_by_command_token_in_multiple_selection() {
        let options = vec![
            candidate(0, "Alpha", "Alpha", false),
            candidate(1, "About", "about", true),
        ];

        assert_eq!(resolve(&options, "about", true), vec![1]);
        assert_eq!(resolve(&options, "About", true), vec![1]);
        assert_eq!(resolve(&options, "a", true), vec![0]);
    }

    #[test]
    fn test_star_selects_everything() {
        assert_eq!(resolve(&greek(), "*", true), vec![0, 1, 2]);
    }

    #[test]
    fn test_pattern_is_case_insensitive() {
        assert_eq!(resolve(&greek(), "B.*", true), vec![1]);
        assert_eq!(resolve(&greek(), "^(alpha|gamma)$", true), vec![0, 2]);
    }

    #[test]
    fn test_pattern_matches_numbers_and_tokens() {
        let options = vec![
            candidate(0, "Alpha", "x1", false),
            candidate(1, "Beta", "y", false),
        ];
        assert_eq!(resolve(&options, "^2$", true), vec![1]);
        assert_eq!(resolve(&options, "x", true), vec![0]);
    }

    #[test]
    fn test_malformed_pattern_matches_nothing() {
        assert!(resolve(&greek(), "(unclosed", true).is_empty());
        assert!(resolve(&greek(), "[z-a]", true).is_empty());
    }

    #[test]
    fn test_oversized_pattern_matches_nothing() {
        assert!(resolve(&greek(), "a{1000}{1000}", true).is_empty());
    }
}
