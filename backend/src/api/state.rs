use domain::Repositories;

#[derive(Clone)]
pub struct RequestState {
    pub repositories: Repositories,
}
