use super::ShellProxy;
use anyhow::Result;
use ash_types::{Context, ExitStatus};
use rand::seq::SliceRandom;
use std::io::BufRead;
use tracing::debug;

pub const ATTEMPTS: usize = 6;
pub const WORD_LEN: usize = 5;

pub fn description() -> &'static str {
    "Guess the five-letter word in six attempts ('exit' leaves the game)"
}

pub fn default_words() -> Vec<String> {
    [
        "stone", "crane", "flame", "ghost", "pride", "train", "world", "candy",
    ]
    .iter()
    .map(|word| word.to_string())
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterScore {
    /// Right letter in the right place
    Exact,
    /// Letter occurs elsewhere in the secret
    Present,
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
    Quit,
}

pub fn command(ctx: &Context, _argv: Vec<String>, proxy: &mut dyn ShellProxy) -> ExitStatus {
    let words: Vec<String> = proxy
        .wordle_words()
        .into_iter()
        .map(|word| word.to_lowercase())
        .filter(|word| word.chars().count() == WORD_LEN)
        .collect();
    let Some(secret) = words.choose(&mut rand::thread_rng()) else {
        ctx.write_stderr("wordle: no five-letter words configured")
            .ok();
        return ExitStatus::ExitedWith(1);
    };

    let stdin = std::io::stdin();
    match play(ctx, secret, &mut stdin.lock()) {
        Ok(outcome) => {
            debug!("wordle finished: {:?}", outcome);
            ExitStatus::ExitedWith(0)
        }
        Err(err) => {
            ctx.write_stderr(&format!("wordle: {err}")).ok();
            ExitStatus::ExitedWith(1)
        }
    }
}

/// Run one game against `secret`, reading guesses line by line from `input`.
/// Guesses of the wrong length do not use up an attempt.
pub fn play<R: BufRead>(ctx: &Context, secret: &str, input: &mut R) -> Result<Outcome> {
    let secret: Vec<char> = secret.chars().collect();
    ctx.write_stdout(&format!(
        "Guess the {WORD_LEN}-letter word! Type 'exit' to leave the game."
    ))?;

    let mut attempt = 1;
    while attempt <= ATTEMPTS {
        ctx.write_stdout(&format!("Attempt {attempt}/{ATTEMPTS}:"))?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(Outcome::Quit);
        }
        let guess = line.trim().to_lowercase();
        if guess == "exit" {
            ctx.write_stdout("Leaving wordle.")?;
            return Ok(Outcome::Quit);
        }
        let guess: Vec<char> = guess.chars().collect();
        if guess.len() != WORD_LEN {
            ctx.write_stdout(&format!("The word must have {WORD_LEN} letters!"))?;
            continue;
        }

        ctx.write_stdout(&render(&guess, &score(&guess, &secret)))?;
        if guess == secret {
            ctx.write_stdout("Congratulations! You guessed the word!")?;
            return Ok(Outcome::Won);
        }
        attempt += 1;
    }

    let secret: String = secret.iter().collect();
    ctx.write_stdout(&format!("Out of attempts, the word was: {secret}"))?;
    Ok(Outcome::Lost)
}

pub fn score(guess: &[char], secret: &[char]) -> Vec<LetterScore> {
    guess
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if secret.get(i) == Some(c) {
                LetterScore::Exact
            } else if secret.contains(c) {
                LetterScore::Present
            } else {
                LetterScore::Absent
            }
        })
        .collect()
}

fn render(guess: &[char], scores: &[LetterScore]) -> String {
    guess
        .iter()
        .zip(scores)
        .map(|(c, s)| match s {
            LetterScore::Exact => console::style(c).green().to_string(),
            LetterScore::Present => console::style(c).yellow().to_string(),
            LetterScore::Absent => console::style(c).dim().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Captured;
    use std::io::Cursor;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_score_marks_letters() {
        use LetterScore::*;
        assert_eq!(
            score(&chars("crate"), &chars("trace")),
            vec![Present, Exact, Exact, Present, Exact]
        );
        assert_eq!(score(&chars("xxxxx"), &chars("stone")), vec![Absent; 5]);
    }

    #[test]
    fn test_win_after_wrong_length_guess() {
        let mut cap = Captured::new();
        let mut input = Cursor::new("abc\nflame\nstone\n");
        let outcome = play(&cap.ctx, "stone", &mut input).unwrap();
        assert_eq!(outcome, Outcome::Won);
        let out = cap.stdout();
        assert!(out.contains("must have 5 letters"));
        assert!(out.contains("Attempt 2/6"));
        assert!(!out.contains("Attempt 3/6"));
    }

    #[test]
    fn test_exit_leaves_game() {
        let cap = Captured::new();
        let mut input = Cursor::new("EXIT\n");
        assert_eq!(play(&cap.ctx, "stone", &mut input).unwrap(), Outcome::Quit);
    }

    #[test]
    fn test_lost_reveals_secret() {
        let mut cap = Captured::new();
        let mut input = Cursor::new("aaaaa\n".repeat(ATTEMPTS));
        assert_eq!(play(&cap.ctx, "stone", &mut input).unwrap(), Outcome::Lost);
        assert!(cap.stdout().contains("the word was: stone"));
    }

    #[test]
    fn test_end_of_input_quits() {
        let cap = Captured::new();
        let mut input = Cursor::new("");
        assert_eq!(play(&cap.ctx, "stone", &mut input).unwrap(), Outcome::Quit);
    }
}
