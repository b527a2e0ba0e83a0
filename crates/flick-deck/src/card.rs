/// Anything the deck can present. The id is used for logging and for
/// collaborators' decision bookkeeping; the deck itself never interprets it.
pub trait Card {
    fn id(&self) -> &str;
}
