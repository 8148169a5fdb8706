use crate::config::Config;
use crate::stay::service::StayService;
use crate::wishlist::service::WishlistService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub stays: StayService,
    pub wishlists: WishlistService,
}
