use super::{DialogueLine, SceneMarker};

const SCENE_LABEL: &str = "scene";

/// Separate stage directions from spoken dialogue.
///
/// Every input line ends up in exactly one of the two outputs, in input order.
pub fn segregate_scenes(lines: Vec<DialogueLine>) -> (Vec<DialogueLine>, Vec<SceneMarker>) {
    let mut dialogues = Vec::with_capacity(lines.len());
    let mut scenes = Vec::new();

    for line in lines {
        if line.speaker.to_lowercase() == SCENE_LABEL {
            scenes.push(SceneMarker {
                description: line.text,
                transcript: line.transcript,
            });
        } else {
            dialogues.push(line);
        }
    }

    (dialogues, scenes)
}
