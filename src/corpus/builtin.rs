//! Built-in demo data for an assistive-vision voice interface.

use super::{Corpus, CorpusError};

const EVAL_DATASET_JSON: &str = include_str!("../../data/eval_dataset.json");

/// Seed templates for the default intent categories.
///
/// Includes an explicit `other` category of out-of-domain requests; it
/// competes in ranking like any other category.
pub fn default_intents() -> Corpus {
    Corpus::new()
        .with_label(
            "read_text",
            [
                "Can you read aloud what's written here?",
                "Please read the text shown on the screen.",
                "What does the writing say on that sign?",
                "Tell me exactly what the label says.",
                "Could you read the message displayed in front of me?",
                "What are the words written on this surface?",
            ],
        )
        .with_label(
            "describe_scene",
            [
                "Can you describe what's happening around me?",
                "What do you see in this area?",
                "Give me a detailed description of the scene.",
                "Describe the setting and objects nearby.",
                "Tell me what the surroundings look like.",
                "What's visible in the current environment?",
            ],
        )
        .with_label(
            "activate_detection_collision",
            [
                "Please enable obstacle and hazard detection.",
                "Turn on the collision prevention system now.",
                "Start the object and movement detection feature.",
                "Activate sensors to detect anything I might bump into.",
                "Can you switch on the obstacle warning system?",
                "Enable collision alerts and monitoring, please.",
            ],
        )
        .with_label(
            "locate_object",
            [
                "Where is the phone?",
                "Can you find my keys?",
                "Help me locate my wallet.",
                "Where did I leave my glasses?",
                "Can you track down my backpack?",
            ],
        )
        .with_label(
            "other",
            [
                "Play some background music.",
                "What's the weather forecast for today?",
                "Remind me about my 5 PM meeting.",
                "Call my mother's phone.",
                "Open the phone's camera app.",
                "Show directions to the nearest grocery store.",
            ],
        )
}

/// Small labeled evaluation set over the same categories.
pub fn demo_dataset() -> Corpus {
    Corpus::new()
        .with_label(
            "read_text",
            [
                "What does this label say?",
                "Can you read the document for me?",
                "Please read out loud what is written here.",
                "Tell me the contents of this sign.",
                "Read the instructions on the box.",
                "What is the text on this page?",
            ],
        )
        .with_label(
            "describe_scene",
            [
                "What do you see around you?",
                "Can you describe this scene to me?",
                "What is happening here?",
                "Tell me about the surroundings.",
                "What objects do you notice?",
                "What does the place look like?",
            ],
        )
        .with_label(
            "activate_detection_collision",
            [
                "Turn on obstacle detection.",
                "Activate collision detection mode.",
                "Please enable collision avoidance.",
                "Start the collision detector.",
                "Switch on obstacle awareness.",
                "Can you enable safety detection?",
            ],
        )
        .with_label(
            "locate_object",
            [
                "Find my phone.",
                "Where is my wallet?",
                "Locate the keys for me.",
                "Find the remote control.",
                "Can you locate my bag?",
                "Where is the laptop?",
            ],
        )
        .with_label(
            "other",
            [
                "Tell me a joke.",
                "Sing me a song.",
                "Who created you?",
                "What time is it?",
                "Can you dance?",
                "What's your favorite color?",
            ],
        )
}

/// Full labeled evaluation set (roughly a hundred phrases per category),
/// shipped as `data/eval_dataset.json`.
pub fn eval_dataset() -> Result<Corpus, CorpusError> {
    Corpus::from_json_str(EVAL_DATASET_JSON)
}
