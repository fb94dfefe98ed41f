//! Fixed prompt texts and the grounding instruction builder.
//!
//! The system instruction is fixed per process: only the injected context
//! block varies between requests.

/// The refusal sentence the completion service must use when the answer is
/// absent from the supplied documentation.
pub const REFUSAL_SENTENCE: &str = "Je ne trouve pas l'information dans les documents à ma \
     disposition. Veuillez contacter le 64 64 pour plus de détails.";

/// Appended as a normal assistant message when the external call fails.
pub const GENERIC_FAILURE_TEXT: &str = "Désolé, une erreur est survenue. Veuillez réessayer ou \
     contacter un représentant si le problème persiste.";

/// Build the system instruction with the grounding context inside it.
pub fn grounding_instruction(context: &str) -> String {
    format!(
        "Tu es un collègue syndical spécialiste pour les agents de la collectivité.\n\
         Ta mission est de répondre aux questions des agents en te basant EXCLUSIVEMENT \
         sur la documentation fournie ci-dessous.\n\
         NE JAMAIS utiliser tes connaissances générales.\n\
         Si la réponse ne se trouve pas dans la documentation, réponds : \"{REFUSAL_SENTENCE}\"\n\
         Sois précis, utilise un ton AMICAL et cite le titre du chapitre si possible.\n\
         --- DEBUT DE LA DOCUMENTATION PERTINENTE ---\n\
         {context}\n\
         --- FIN DE LA DOCUMENTATION PERTINENTE ---"
    )
}
