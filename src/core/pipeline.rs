use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::generator::Generator;
use crate::core::{Assignment, ConfigProvider, Letter, Participant, Pipeline, Roster, Storage};
use crate::utils::error::Result;

/// Production pipeline: roster from configuration, a seeded draw, and one
/// letter file per giver through the storage port.
pub struct LetterPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> LetterPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        LetterPipeline { storage, config }
    }

    fn render_letter(&self, giver: &Participant, recipient: &Participant, art: Option<&str>) -> Letter {
        let mut body = format!(
            "Hello {}!\n\
             \n\
             This letter for \"{}\" was generated by santa-o-matic {} on {}.\n\
             \n\
             You are secret santa for ... (drumroll) ...\n\
             \n\
             \u{20}    {}\n\
             \n\
             Enjoy! And please don't tell anyone!\n",
            giver,
            self.config.exchange_name(),
            env!("CARGO_PKG_VERSION"),
            chrono::Local::now().format("%Y-%m-%d"),
            recipient,
        );

        if let Some(art) = art {
            body.push('\n');
            body.push_str(art);
        }

        Letter {
            giver: giver.clone(),
            body,
        }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for LetterPipeline<S, C> {
    fn assemble(&self) -> Result<Roster> {
        Roster::from_entries(&self.config.entries())
    }

    fn draw(&self, roster: &Roster) -> Result<Assignment> {
        let generator = Generator::new(self.config.max_tries());
        let mut rng = match self.config.seed() {
            Some(seed) => {
                tracing::debug!(seed, "seeding random source");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        generator.generate(roster, &mut rng)
    }

    fn deliver(&self, assignment: &Assignment) -> Result<String> {
        if self.config.dry_run() {
            println!("Drawn pairs for \"{}\":", self.config.exchange_name());
            for (giver, recipient) in assignment.pairs() {
                println!("  {} gives a gift to {}", giver, recipient);
            }
            return Ok("(dry run, nothing written)".to_string());
        }

        let art = match self.config.ascii_art_path() {
            Some(path) => Some(std::fs::read_to_string(path)?),
            None => None,
        };

        // Render everything before the first write so a rendering problem
        // cannot leave a half-written output directory behind.
        let letters: Vec<Letter> = assignment
            .pairs()
            .map(|(giver, recipient)| self.render_letter(giver, recipient, art.as_deref()))
            .collect();

        for letter in &letters {
            tracing::debug!(giver = %letter.giver, "writing letter");
            self.storage
                .write_file(&letter.file_name(), letter.body.as_bytes())?;
        }

        Ok(self.config.output_path().to_string())
    }
}
