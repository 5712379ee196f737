//! Database Models
//!
//! 所有实体为固定结构（强类型），序列化为 camelCase 文档。
//! 旧数据的字段别名在输入边界由 [`crate::db::normalize`] 统一。

pub mod serde_helpers;

pub mod booking;
pub mod booking_item;
pub mod company_info;
pub mod food_item;
pub mod notification;
pub mod review;
pub mod staff;
pub mod staff_request;

pub use booking::{
    ApprovalStatus, Booking, BookingCreate, BookingId, BookingStatus, BookingUpdate, PaymentPhase,
    PaymentState, PaymentStatus,
};
pub use booking_item::{BookingItem, BookingItemInput};
pub use company_info::{CompanyInfo, CompanyInfoUpdate};
pub use food_item::{DietType, FoodItem, FoodItemCreate, FoodItemUpdate};
pub use notification::{AdminNotification, NotificationCreate, NotificationUpdate};
pub use review::{CustomerReview, ReviewCreate, ReviewUpdate};
pub use staff::{Staff, StaffCreate, StaffId, StaffRole, StaffUpdate};
pub use staff_request::{
    AssignedStaffView, RequestStatus, ResolvedRequest, StaffBookingRequest,
};
