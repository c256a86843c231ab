//! Prompt construction for every port operation.

use crate::domain::models::{
    CitationStyle, Intensity, IntensityBand, ParaphraseMode, RewriteStyle, SummaryFormat, Tone,
};

/// A single-turn prompt with its sampling temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    pub temperature: Option<f32>,
}

const MARKUP_CONTRACT: &str = "Output format (mandatory):\n\
- Return only the rewritten text, with every change marked inline.\n\
- Write each removed fragment between ~~ and ~~, immediately followed by its replacement between ** and **, with nothing in between. Example: I ~~is~~**am** happy.\n\
- Leave untouched text exactly as it was.\n\
- No commentary, no preamble, no explanation.";

const JSON_ONLY: &str = "Reply with a single JSON object and nothing else.";

pub fn rewrite(text: &str, style: RewriteStyle, intensity: Intensity) -> Prompt {
    match style {
        RewriteStyle::Humanize(tone) => humanize(text, tone, intensity),
        RewriteStyle::Paraphrase(mode) => paraphrase(text, mode),
        RewriteStyle::Proofread => proofread(text),
    }
}

fn humanize(text: &str, tone: Tone, intensity: Intensity) -> Prompt {
    let system = format!(
        "You rewrite text so that it reads as if a person wrote it and passes AI-writing \
         detectors. How far you go depends on a humanization level from 1 to 100.\n\n{}\n\n{}\n\n{MARKUP_CONTRACT}",
        persona(intensity.band()),
        tone_guidance(tone),
    );
    Prompt {
        system,
        user: format!(
            "Humanize the following text (level {intensity}, tone {tone}):\n\n\"{text}\""
        ),
        temperature: Some(intensity.temperature()),
    }
}

fn persona(band: IntensityBand) -> &'static str {
    match band {
        IntensityBand::Subtle => {
            "Level band: Subtle.\n\
             - Polish rather than rewrite; improve flow and clarity.\n\
             - Vary sentence structure slightly so it is not monotonous.\n\
             - Stay professional; no slang."
        }
        IntensityBand::Natural => {
            "Level band: Natural.\n\
             - Make the prose sound less mechanical.\n\
             - Vary sentence length a little and use everyday contractions.\n\
             - Aim for a more readable version of the same text."
        }
        IntensityBand::Casual => {
            "Level band: Casual.\n\
             - Write like a sharp person in a bit of a hurry.\n\
             - Mix long sentences with short fragments for an uneven rhythm.\n\
             - Allow informal wording, common idioms and looser punctuation."
        }
        IntensityBand::VeryHuman => {
            "Level band: Very Human.\n\
             - Lean into a conversational voice with asides and light slang.\n\
             - Small imperfections are welcome: dashes, trailing ellipses, the odd run-on.\n\
             - Authentic voice beats perfect grammar."
        }
        IntensityBand::Chaotic => {
            "Level band: Chaotic Human.\n\
             - Sound like an energetic social media post.\n\
             - Be unpredictable in wording and structure; fragments, slang and humour are fine.\n\
             - Messy is acceptable as long as it is unmistakably human."
        }
    }
}

fn tone_guidance(tone: Tone) -> &'static str {
    match tone {
        Tone::Neutral => {
            "Tone: Neutral. Stay balanced and impartial, avoid emotional language, present information plainly."
        }
        Tone::Friendly => {
            "Tone: Friendly. Be warm and approachable, use contractions and positive language, as if talking to a friend."
        }
        Tone::Professional => {
            "Tone: Professional. Use formal, respectful and objective language with no slang or contractions."
        }
        Tone::Confident => {
            "Tone: Confident. Use strong declarative sentences, no hedging words such as \"might\" or \"perhaps\"."
        }
    }
}

fn paraphrase(text: &str, mode: ParaphraseMode) -> Prompt {
    let instruction = match mode {
        ParaphraseMode::Simpler => "Make it much simpler and easy for a general audience to follow.",
        ParaphraseMode::Balanced => "Keep the original tone and meaning while offering a fresh alternative.",
        ParaphraseMode::Formal => "Make it sound formal, academic and professional.",
        ParaphraseMode::Creative => "Make it creative and original, with unusual vocabulary and sentence shapes.",
        ParaphraseMode::Expand => "Expand on it, adding relevant detail and elaborating the key points.",
        ParaphraseMode::Shorten => "Condense it so it is concise without losing anything essential.",
    };
    let temperature = if mode == ParaphraseMode::Creative { 0.9 } else { 0.7 };
    Prompt {
        system: format!(
            "You are an expert writer. Paraphrase the text you are given while preserving its core meaning. \
             {instruction}\n\n{MARKUP_CONTRACT}"
        ),
        user: format!("Text to paraphrase: \"{text}\""),
        temperature: Some(temperature),
    }
}

fn proofread(text: &str) -> Prompt {
    Prompt {
        system: format!(
            "You are a meticulous proofreader. Fix grammar, spelling and punctuation errors and nothing else.\n\n{MARKUP_CONTRACT}"
        ),
        user: format!("Correct the following text: \"{text}\""),
        temperature: Some(0.0),
    }
}

pub fn detect(text: &str) -> Prompt {
    Prompt {
        system: "You are a computational linguist acting as an accurate AI-text detector. \
                 You decide whether a text was written by a person or generated by a model, \
                 looking past surface grammar."
            .to_string(),
        user: format!(
            "Analyse the text below for stylistic signs of machine generation:\n\
             - predictable, safe word choice\n\
             - uniform sentence length and structure (low burstiness)\n\
             - stiff transitions such as \"Furthermore\" or \"Moreover\"\n\
             - no distinct voice or perspective\n\
             - flawless but lifeless prose (low perplexity)\n\
             - rigid list-like structure inside paragraphs\n\n\
             Do not penalise text just for being formal, technical or well written.\n\n\
             {JSON_ONLY} Fields: \"score\" (number, 0 = very likely human, 100 = very likely AI), \
             \"explanation\" (string citing evidence from the text), \
             \"suspicious_sentences\" (array of the sentences that most suggest AI).\n\n\
             Text to analyse: \"{text}\""
        ),
        temperature: Some(0.0),
    }
}

pub fn summarize(text: &str, format: SummaryFormat, word_count: u32) -> Prompt {
    let shape = match format {
        SummaryFormat::Paragraph => "a single paragraph",
        SummaryFormat::BulletPoints => "a list of key bullet points",
    };
    Prompt {
        system: "You are an expert summarizer who distills text into accurate summaries of a requested length and shape."
            .to_string(),
        user: format!(
            "Summarize the following text in about {word_count} words, written as {shape}. \
             Return only the summary. Text: \"{text}\""
        ),
        temperature: None,
    }
}

pub fn complete(text: &str) -> Prompt {
    Prompt {
        system: "You are an expert writer who continues drafts in the author's voice.".to_string(),
        user: format!(
            "Continue the text below with one or two paragraphs that follow on logically and develop its ideas. \
             Return only the new paragraphs.\n---\n{text}"
        ),
        temperature: Some(0.7),
    }
}

pub fn analyze(text: &str) -> Prompt {
    Prompt {
        system: "You analyse texts for readability, tone and length.".to_string(),
        user: format!(
            "{JSON_ONLY} Fields: \"readability\" (reading level, e.g. \"8th Grade Level\"), \
             \"tone\" (short description of the dominant tone), \"word_count\" (integer).\n\n\
             Text: \"{text}\""
        ),
        temperature: Some(0.0),
    }
}

pub fn research(topic: &str) -> Prompt {
    Prompt {
        system: "You are a research assistant who writes concise, factual topic summaries and names the sources they rest on."
            .to_string(),
        user: format!(
            "Research the topic \"{topic}\". {JSON_ONLY} Fields: \"summary\" (string), \
             \"sources\" (array of objects with \"uri\" and \"title\")."
        ),
        temperature: Some(0.3),
    }
}

pub fn find_sources(text: &str) -> Prompt {
    Prompt {
        system: "You check whether text has been published elsewhere online.".to_string(),
        user: format!(
            "Does the following text appear elsewhere on the internet? {JSON_ONLY} Field: \
             \"sources\" (array of objects with \"uri\" and \"title\"; empty when there is no match).\n\n\
             \"{text}\""
        ),
        temperature: Some(0.0),
    }
}

pub fn citation(style: CitationStyle, source: &str) -> Prompt {
    let subject = if source.starts_with("http://") || source.starts_with("https://") {
        format!("the content at this URL: {source}")
    } else {
        format!("the following source information:\n{source}")
    };
    Prompt {
        system: "You are an academic librarian who formats citations. Provide only the formatted citation."
            .to_string(),
        user: format!("Write one complete {style} citation for {subject}"),
        temperature: Some(0.0),
    }
}
