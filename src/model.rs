mod communication_record;

pub use communication_record::{
    AdminResponse, CommunicationRecord, CommunicationUpdate, NewCommunication,
};
