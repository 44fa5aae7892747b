pub trait JobListView: Send + Sync {
    fn refresh(&self);
}
