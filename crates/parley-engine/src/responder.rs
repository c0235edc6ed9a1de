use anyhow::Result;
use chrono::Local;
use rand::seq::IndexedRandom;
use regex::Regex;

use crate::classifier::IntentClassifier;
use crate::intents::IntentSet;

/// Predictions below this probability fall back to the fallback intent
const CONFIDENCE_FLOOR: f64 = 0.2;

const FALLBACK_TAG: &str = "fallback";

/// Stand-in for `{name}` in response templates before a name is known
const NAME_STAND_IN: &str = "friend";

/// What the service remembers about the user. Process-lifetime only.
#[derive(Debug, Default)]
struct UserMemory {
    name: Option<String>,
}

/// Turns one user message into one reply.
///
/// Evaluation order: name introductions, identity recall, then intent
/// classification with dynamic time/date answers, a canned response from
/// the predicted intent, or the fallback when confidence is too low.
pub struct Responder {
    intents: IntentSet,
    classifier: IntentClassifier,
    name_capture: Regex,
    memory: UserMemory,
}

impl Responder {
    pub fn new(intents: IntentSet) -> Result<Self> {
        let classifier = IntentClassifier::train(&intents)?;
        let name_capture = Regex::new(r"(?:my name is|i am|i'm|call me)\s+(\w+)")?;
        Ok(Self {
            intents,
            classifier,
            name_capture,
            memory: UserMemory::default(),
        })
    }

    /// Produce the reply for one message
    pub fn respond(&mut self, message: &str) -> String {
        let msg = message.trim().to_lowercase();

        if let Some(captures) = self.name_capture.captures(&msg) {
            let name = capitalize(&captures[1]);
            self.memory.name = Some(name.clone());
            return format!("Nice to meet you, {}! I'll remember your name.", name);
        }

        if let Some(name) = &self.memory.name {
            if msg.contains("who am i") {
                return format!("You're {}! 👋", name);
            }
        }

        let prediction = self.classifier.classify(&msg);
        eprintln!(
            "[debug] message={:?} intent={} confidence={:.2}",
            msg, prediction.tag, prediction.confidence
        );

        let tag = if prediction.confidence < CONFIDENCE_FLOOR {
            FALLBACK_TAG
        } else {
            prediction.tag.as_str()
        };

        match tag {
            "time" => {
                return format!("The current time is {} ⏰", Local::now().format("%H:%M:%S"))
            }
            "date" => return format!("Today is {} 📅", Local::now().format("%A, %B %d, %Y")),
            _ => {}
        }

        if let Some(intent) = self.intents.find(tag) {
            if let Some(template) = intent.responses.choose(&mut rand::rng()) {
                return self.fill_template(template);
            }
        }

        "Hmm, I'm not sure about that.".to_string()
    }

    /// The remembered user name, if one was introduced
    pub fn user_name(&self) -> Option<&str> {
        self.memory.name.as_deref()
    }

    fn fill_template(&self, template: &str) -> String {
        let name = self.memory.name.as_deref().unwrap_or(NAME_STAND_IN);
        template.replace("{name}", name)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
