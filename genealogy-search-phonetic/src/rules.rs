//! Generic Daitch-Mokotoff coding engine.
//!
//! A rule maps a letter sequence to a code that depends on its position: at
//! the start of the name, directly before a vowel, or anywhere else. A code
//! may list alternatives separated by `|` (an empty alternative means "not
//! coded"); every alternative forks the set of candidate codes.

/// Maximum number of digits in a code.
pub const CODE_LENGTH: usize = 6;

/// One coding rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub pattern: &'static str,
    pub at_start: &'static str,
    pub before_vowel: &'static str,
    pub other: &'static str,
}

impl Rule {
    pub const fn new(
        pattern: &'static str,
        at_start: &'static str,
        before_vowel: &'static str,
        other: &'static str,
    ) -> Self {
        Self {
            pattern,
            at_start,
            before_vowel,
            other,
        }
    }

    fn matches(&self, input: &[char], pos: usize) -> bool {
        let mut idx = pos;
        for pc in self.pattern.chars() {
            match input.get(idx) {
                Some(&c) if c == pc => idx += 1,
                _ => return false,
            }
        }
        true
    }

    fn len(&self) -> usize {
        self.pattern.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Branch {
    code: String,
    last: Option<&'static str>,
}

impl Branch {
    fn push(&mut self, replacement: &'static str) {
        let repeated = self
            .last
            .is_some_and(|last| !replacement.is_empty() && last.ends_with(replacement));
        if !repeated && self.code.len() < CODE_LENGTH {
            self.code.push_str(replacement);
        }
        self.last = Some(replacement);
    }
}

/// Code a normalized letter sequence against a rule table.
///
/// Returns every distinct code in the order its branch was created, each
/// zero padded to [`CODE_LENGTH`]. Returns an empty vector when nothing in
/// the input is coded.
pub fn apply(rules: &[Rule], input: &[char], is_vowel: fn(char) -> bool) -> Vec<String> {
    let mut branches = vec![Branch {
        code: String::new(),
        last: None,
    }];
    let mut pos = 0;
    let mut matched_any = false;

    while pos < input.len() {
        let Some(rule) = rules
            .iter()
            .filter(|rule| rule.matches(input, pos))
            .max_by_key(|rule| rule.len())
        else {
            pos += 1;
            continue;
        };

        matched_any = true;
        let next = pos + rule.len();
        let coding = if pos == 0 {
            rule.at_start
        } else if input.get(next).copied().is_some_and(is_vowel) {
            rule.before_vowel
        } else {
            rule.other
        };

        let alternatives: Vec<&'static str> = coding.split('|').collect();
        let mut forked = Vec::with_capacity(branches.len() * alternatives.len());
        for branch in &branches {
            for alternative in &alternatives {
                let mut next_branch = branch.clone();
                next_branch.push(alternative);
                if !forked.contains(&next_branch) {
                    forked.push(next_branch);
                }
            }
        }
        branches = forked;
        pos = next;
    }

    if !matched_any {
        return Vec::new();
    }

    let mut codes: Vec<String> = Vec::with_capacity(branches.len());
    for branch in branches {
        let mut code = branch.code;
        code.truncate(CODE_LENGTH);
        while code.len() < CODE_LENGTH {
            code.push('0');
        }
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &[Rule] = &[
        Rule::new("A", "0", "", ""),
        Rule::new("B", "7", "7", "7"),
        Rule::new("BB", "77", "77", "77"),
        Rule::new("C", "5|4", "5|4", "5|4"),
    ];

    fn vowel(c: char) -> bool {
        c == 'A'
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_longest_rule_wins() {
        assert_eq!(apply(RULES, &chars("BB"), vowel), vec!["770000"]);
    }

    #[test]
    fn test_adjacent_duplicates_collapse() {
        // A vowel between two identical codes keeps both
        assert_eq!(apply(RULES, &chars("BAB"), vowel), vec!["770000"]);
        assert_eq!(apply(RULES, &chars("B"), vowel), vec!["700000"]);
        assert_eq!(apply(RULES, &chars("ABB"), vowel), vec!["077000"]);
    }

    #[test]
    fn test_alternatives_fork() {
        assert_eq!(apply(RULES, &chars("CA"), vowel), vec!["500000", "400000"]);
    }

    #[test]
    fn test_uncoded_input() {
        assert!(apply(RULES, &chars("XYZ"), vowel).is_empty());
        assert!(apply(RULES, &[], vowel).is_empty());
    }
}
