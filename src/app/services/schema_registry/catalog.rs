//! Built-in schema catalog
//!
//! Declarations for the tool outputs the timeline viewer opens most often.
//! Registration order is match priority.

use super::schema::{Delimiter, FieldSpec, Schema};
use crate::constants::{
    EVENT_LEVEL_NAMES, FILE_ATTRIBUTE_FLAGS, USN_REASON_FLAGS, YES_NO_TRUTHY_TOKENS,
};

/// All built-in schemas in registration order
pub fn builtin_schemas() -> Vec<Schema> {
    vec![
        kape_skip_log(),
        kape_copy_log(),
        mftecmd_mft(),
        mftecmd_usn_journal(),
        pecmd(),
        pecmd_timeline(),
        lecmd(),
        jlecmd_automatic_destinations(),
        appcompatcache(),
        amcache_unassociated_files(),
        evtxecmd(),
        recmd_batch(),
        sbecmd_shellbags(),
        rbcmd(),
        browsing_history_view(),
        autorunsc(),
        regripper_tln(),
        l2t_csv(),
    ]
}

/// Generic CSV/TSV schema whose columns come from the header
pub fn generic_csv() -> Schema {
    Schema::discovered("generic_csv", "Generic CSV/TSV")
}

/// KAPE skip log
pub fn kape_skip_log() -> Schema {
    Schema::fixed("kape_skip_log", "KAPE skip log")
        .header("SourceFile,SourceFileSha1,Reason")
        .field(FieldSpec::string("SourceFile").required())
        .field(FieldSpec::string("SourceFileSha1"))
        .field(FieldSpec::string("Reason"))
}

/// KAPE copy log
pub fn kape_copy_log() -> Schema {
    Schema::fixed("kape_copy_log", "KAPE copy log")
        .header(
            "CopiedTimestamp,SourceFile,DestinationFile,FileSize,SourceFileSha1,DeferredCopy,\
             CreatedOnUtc,ModifiedOnUtc,LastAccessedOnUtc,CopyDuration",
        )
        .field(FieldSpec::datetime("CopiedTimestamp").required())
        .field(FieldSpec::string("SourceFile").required())
        .field(FieldSpec::string("DestinationFile"))
        .field(FieldSpec::long("FileSize"))
        .field(FieldSpec::string("SourceFileSha1"))
        .field(FieldSpec::boolean("DeferredCopy"))
        .field(FieldSpec::nullable_datetime("CreatedOnUtc"))
        .field(FieldSpec::nullable_datetime("ModifiedOnUtc"))
        .field(FieldSpec::nullable_datetime("LastAccessedOnUtc"))
        .field(FieldSpec::timespan("CopyDuration").nullable())
}

/// MFTECmd `$MFT` output
pub fn mftecmd_mft() -> Schema {
    Schema::fixed("mftecmd_mft", "MFTECmd $MFT")
        .header(
            "EntryNumber,SequenceNumber,InUse,ParentEntryNumber,ParentSequenceNumber,ParentPath,\
             FileName,Extension,FileSize,ReferenceCount,ReparseTarget,IsDirectory,HasAds,IsAds,\
             SI<FN,uSecZeros,Copied,SiFlags,NameType,Created0x10,Created0x30,LastModified0x10,\
             LastModified0x30,LastRecordChange0x10,LastRecordChange0x30,LastAccess0x10,\
             LastAccess0x30,UpdateSequenceNumber,LogfileSequenceNumber,SecurityId,\
             ObjectIdFileDroid,LoggedUtilStream,ZoneIdContents",
        )
        .field(FieldSpec::long("EntryNumber").required())
        .field(FieldSpec::int("SequenceNumber"))
        .field(FieldSpec::boolean("InUse"))
        .field(FieldSpec::long("ParentEntryNumber"))
        .field(FieldSpec::int("ParentSequenceNumber").nullable())
        .field(FieldSpec::string("ParentPath"))
        .field(FieldSpec::string("FileName"))
        .field(FieldSpec::string("Extension"))
        .field(FieldSpec::unsigned_long("FileSize"))
        .field(FieldSpec::int("ReferenceCount"))
        .field(FieldSpec::string("ReparseTarget"))
        .field(FieldSpec::boolean("IsDirectory"))
        .field(FieldSpec::boolean("HasAds"))
        .field(FieldSpec::boolean("IsAds"))
        .field(FieldSpec::boolean("SI<FN"))
        .field(FieldSpec::boolean("uSecZeros"))
        .field(FieldSpec::boolean("Copied"))
        .field(FieldSpec::string("SiFlags"))
        .field(FieldSpec::string("NameType"))
        .field(FieldSpec::nullable_datetime("Created0x10"))
        .field(FieldSpec::nullable_datetime("Created0x30"))
        .field(FieldSpec::nullable_datetime("LastModified0x10"))
        .field(FieldSpec::nullable_datetime("LastModified0x30"))
        .field(FieldSpec::nullable_datetime("LastRecordChange0x10"))
        .field(FieldSpec::nullable_datetime("LastRecordChange0x30"))
        .field(FieldSpec::nullable_datetime("LastAccess0x10"))
        .field(FieldSpec::nullable_datetime("LastAccess0x30"))
        .field(FieldSpec::long("UpdateSequenceNumber"))
        .field(FieldSpec::long("LogfileSequenceNumber"))
        .field(FieldSpec::int("SecurityId"))
        .field(FieldSpec::string("ObjectIdFileDroid"))
        .field(FieldSpec::string("LoggedUtilStream"))
        .field(FieldSpec::string("ZoneIdContents"))
}

/// MFTECmd `$J` (USN journal) output with raw hexadecimal masks
pub fn mftecmd_usn_journal() -> Schema {
    Schema::fixed("mftecmd_usn_journal", "MFTECmd $J")
        .header(
            "Name,Extension,EntryNumber,SequenceNumber,ParentEntryNumber,ParentSequenceNumber,\
             ParentPath,UpdateSequenceNumber,UpdateTimestamp,UpdateReasons,FileAttributes,\
             OffsetToData,SourceFile",
        )
        .field(FieldSpec::string("Name"))
        .field(FieldSpec::string("Extension"))
        .field(FieldSpec::long("EntryNumber"))
        .field(FieldSpec::int("SequenceNumber"))
        .field(FieldSpec::long("ParentEntryNumber"))
        .field(FieldSpec::int("ParentSequenceNumber"))
        .field(FieldSpec::string("ParentPath"))
        .field(FieldSpec::long("UpdateSequenceNumber"))
        .field(FieldSpec::datetime("UpdateTimestamp").required())
        .field(FieldSpec::string("UpdateReasons").hex_flags(USN_REASON_FLAGS))
        .field(FieldSpec::string("FileAttributes").hex_flags(FILE_ATTRIBUTE_FLAGS))
        .field(FieldSpec::long("OffsetToData"))
        .field(FieldSpec::string("SourceFile"))
}

/// PECmd prefetch summary
pub fn pecmd() -> Schema {
    Schema::fixed("pecmd", "PECmd prefetch")
        .header(
            "Note,SourceFilename,SourceCreated,SourceModified,SourceAccessed,ExecutableName,Hash,\
             Size,Version,RunCount,LastRun,PreviousRun0,PreviousRun1,PreviousRun2,PreviousRun3,\
             PreviousRun4,PreviousRun5,PreviousRun6,Volume0Name,Volume0Serial,Volume0Created,\
             Volume1Name,Volume1Serial,Volume1Created,Directories,FilesLoaded,ParsingError",
        )
        .field(FieldSpec::string("Note"))
        .field(FieldSpec::string("SourceFilename").required())
        .field(FieldSpec::nullable_datetime("SourceCreated"))
        .field(FieldSpec::nullable_datetime("SourceModified"))
        .field(FieldSpec::nullable_datetime("SourceAccessed"))
        .field(FieldSpec::string("ExecutableName"))
        .field(FieldSpec::string("Hash"))
        .field(FieldSpec::long("Size"))
        .field(FieldSpec::string("Version"))
        .field(FieldSpec::int("RunCount"))
        .field(FieldSpec::nullable_datetime("LastRun"))
        .field(FieldSpec::nullable_datetime("PreviousRun0"))
        .field(FieldSpec::nullable_datetime("PreviousRun1"))
        .field(FieldSpec::nullable_datetime("PreviousRun2"))
        .field(FieldSpec::nullable_datetime("PreviousRun3"))
        .field(FieldSpec::nullable_datetime("PreviousRun4"))
        .field(FieldSpec::nullable_datetime("PreviousRun5"))
        .field(FieldSpec::nullable_datetime("PreviousRun6"))
        .field(FieldSpec::string("Volume0Name"))
        .field(FieldSpec::string("Volume0Serial"))
        .field(FieldSpec::nullable_datetime("Volume0Created"))
        .field(FieldSpec::string("Volume1Name"))
        .field(FieldSpec::string("Volume1Serial"))
        .field(FieldSpec::nullable_datetime("Volume1Created"))
        .field(FieldSpec::string("Directories"))
        .field(FieldSpec::string("FilesLoaded"))
        .field(FieldSpec::boolean("ParsingError"))
}

/// PECmd run timeline
pub fn pecmd_timeline() -> Schema {
    Schema::fixed("pecmd_timeline", "PECmd timeline")
        .header("RunTime,ExecutableName")
        .field(FieldSpec::datetime("RunTime").required())
        .field(FieldSpec::string("ExecutableName").required())
}

/// LECmd shortcut (.lnk) output
pub fn lecmd() -> Schema {
    Schema::fixed("lecmd", "LECmd shortcuts")
        .header(
            "SourceFile,SourceCreated,SourceModified,SourceAccessed,TargetCreated,TargetModified,\
             TargetAccessed,FileSize,RelativePath,WorkingDirectory,FileAttributes,HeaderFlags,\
             DriveType,VolumeSerialNumber,VolumeLabel,LocalPath,NetworkPath,CommonPath,Arguments,\
             TargetIDAbsolutePath,TargetMFTEntryNumber,TargetMFTSequenceNumber,MachineID,\
             MachineMACAddress,MACVendor,TrackerCreatedOn,ExtraBlocksPresent",
        )
        .field(FieldSpec::string("SourceFile").required())
        .field(FieldSpec::nullable_datetime("SourceCreated"))
        .field(FieldSpec::nullable_datetime("SourceModified"))
        .field(FieldSpec::nullable_datetime("SourceAccessed"))
        .field(FieldSpec::nullable_datetime("TargetCreated"))
        .field(FieldSpec::nullable_datetime("TargetModified"))
        .field(FieldSpec::nullable_datetime("TargetAccessed"))
        .field(FieldSpec::long("FileSize"))
        .field(FieldSpec::string("RelativePath"))
        .field(FieldSpec::string("WorkingDirectory"))
        .field(FieldSpec::string("FileAttributes"))
        .field(FieldSpec::string("HeaderFlags"))
        .field(FieldSpec::string("DriveType"))
        .field(FieldSpec::string("VolumeSerialNumber"))
        .field(FieldSpec::string("VolumeLabel"))
        .field(FieldSpec::string("LocalPath"))
        .field(FieldSpec::string("NetworkPath"))
        .field(FieldSpec::string("CommonPath"))
        .field(FieldSpec::string("Arguments"))
        .field(FieldSpec::string("TargetIDAbsolutePath"))
        .field(FieldSpec::long("TargetMFTEntryNumber").nullable())
        .field(FieldSpec::int("TargetMFTSequenceNumber").nullable())
        .field(FieldSpec::string("MachineID"))
        .field(FieldSpec::string("MachineMACAddress"))
        .field(FieldSpec::string("MACVendor"))
        .field(FieldSpec::nullable_datetime("TrackerCreatedOn"))
        .field(FieldSpec::string("ExtraBlocksPresent"))
}

/// JLECmd automatic destinations jump lists
pub fn jlecmd_automatic_destinations() -> Schema {
    Schema::fixed("jlecmd_automatic", "JLECmd automatic destinations")
        .header(
            "SourceFile,SourceCreated,SourceModified,SourceAccessed,AppId,AppIdDescription,\
             DestListVersion,LastUsedEntryNumber,MRU,EntryNumber,CreationTime,LastModified,\
             Hostname,MacAddress,Path,InteractionCount,PinStatus,TargetCreated,TargetModified,\
             TargetAccessed,FileSize,LocalPath,CommonPath,Arguments",
        )
        .field(FieldSpec::string("SourceFile").required())
        .field(FieldSpec::nullable_datetime("SourceCreated"))
        .field(FieldSpec::nullable_datetime("SourceModified"))
        .field(FieldSpec::nullable_datetime("SourceAccessed"))
        .field(FieldSpec::string("AppId"))
        .field(FieldSpec::string("AppIdDescription"))
        .field(FieldSpec::int("DestListVersion"))
        .field(FieldSpec::int("LastUsedEntryNumber"))
        .field(FieldSpec::int("MRU"))
        .field(FieldSpec::int("EntryNumber"))
        .field(FieldSpec::nullable_datetime("CreationTime"))
        .field(FieldSpec::nullable_datetime("LastModified"))
        .field(FieldSpec::string("Hostname"))
        .field(FieldSpec::string("MacAddress"))
        .field(FieldSpec::string("Path"))
        .field(FieldSpec::int("InteractionCount").nullable())
        .field(FieldSpec::boolean("PinStatus"))
        .field(FieldSpec::nullable_datetime("TargetCreated"))
        .field(FieldSpec::nullable_datetime("TargetModified"))
        .field(FieldSpec::nullable_datetime("TargetAccessed"))
        .field(FieldSpec::long("FileSize"))
        .field(FieldSpec::string("LocalPath"))
        .field(FieldSpec::string("CommonPath"))
        .field(FieldSpec::string("Arguments"))
}

/// AppCompatCacheParser (shimcache)
pub fn appcompatcache() -> Schema {
    Schema::fixed("appcompatcache", "AppCompatCacheParser")
        .header("ControlSet,CacheEntryPosition,Path,LastModifiedTimeUTC,Executed,Duplicate,SourceFile")
        .truthy(YES_NO_TRUTHY_TOKENS)
        .field(FieldSpec::int("ControlSet"))
        .field(FieldSpec::int("CacheEntryPosition"))
        .field(FieldSpec::string("Path").required())
        .field(FieldSpec::nullable_datetime("LastModifiedTimeUTC"))
        .field(FieldSpec::boolean("Executed"))
        .field(FieldSpec::boolean("Duplicate"))
        .field(FieldSpec::string("SourceFile"))
}

/// AmcacheParser unassociated file entries
pub fn amcache_unassociated_files() -> Schema {
    Schema::fixed("amcache_unassociated", "AmcacheParser unassociated file entries")
        .header(
            "ApplicationName,ProgramId,FileKeyLastWriteTimestamp,SHA1,IsOsComponent,FullPath,Name,\
             FileExtension,LinkDate,ProductName,Size,Version,ProductVersion,LongPathHash,\
             BinaryType,IsPeFile,BinFileVersion,BinProductVersion,Usn,Language,Description",
        )
        .field(FieldSpec::string("ApplicationName"))
        .field(FieldSpec::string("ProgramId"))
        .field(FieldSpec::datetime("FileKeyLastWriteTimestamp").required())
        .field(FieldSpec::string("SHA1"))
        .field(FieldSpec::boolean("IsOsComponent"))
        .field(FieldSpec::string("FullPath"))
        .field(FieldSpec::string("Name"))
        .field(FieldSpec::string("FileExtension"))
        .field(FieldSpec::nullable_datetime("LinkDate"))
        .field(FieldSpec::string("ProductName"))
        .field(FieldSpec::long("Size"))
        .field(FieldSpec::string("Version"))
        .field(FieldSpec::string("ProductVersion"))
        .field(FieldSpec::string("LongPathHash"))
        .field(FieldSpec::string("BinaryType"))
        .field(FieldSpec::boolean("IsPeFile"))
        .field(FieldSpec::string("BinFileVersion"))
        .field(FieldSpec::string("BinProductVersion"))
        .field(FieldSpec::long("Usn").nullable())
        .field(FieldSpec::int("Language").nullable())
        .field(FieldSpec::string("Description"))
}

/// EvtxECmd event log output
pub fn evtxecmd() -> Schema {
    Schema::fixed("evtxecmd", "EvtxECmd event logs")
        .header(
            "RecordNumber,EventRecordId,TimeCreated,EventId,Level,Provider,Channel,ProcessId,\
             ThreadId,Computer,UserId,MapDescription,UserName,RemoteHost,PayloadData1,PayloadData2,\
             PayloadData3,PayloadData4,PayloadData5,PayloadData6,ExecutableInfo,HiddenRecord,\
             SourceFile,Keywords,ExtraDataOffset,Payload",
        )
        .field(FieldSpec::long("RecordNumber"))
        .field(FieldSpec::long("EventRecordId"))
        .field(FieldSpec::datetime("TimeCreated").required())
        .field(FieldSpec::int("EventId").required())
        .field(FieldSpec::string("Level").enum_names(EVENT_LEVEL_NAMES))
        .field(FieldSpec::string("Provider"))
        .field(FieldSpec::string("Channel"))
        .field(FieldSpec::int("ProcessId"))
        .field(FieldSpec::int("ThreadId"))
        .field(FieldSpec::string("Computer"))
        .field(FieldSpec::string("UserId"))
        .field(FieldSpec::string("MapDescription"))
        .field(FieldSpec::string("UserName"))
        .field(FieldSpec::string("RemoteHost"))
        .field(FieldSpec::string("PayloadData1"))
        .field(FieldSpec::string("PayloadData2"))
        .field(FieldSpec::string("PayloadData3"))
        .field(FieldSpec::string("PayloadData4"))
        .field(FieldSpec::string("PayloadData5"))
        .field(FieldSpec::string("PayloadData6"))
        .field(FieldSpec::string("ExecutableInfo"))
        .field(FieldSpec::boolean("HiddenRecord"))
        .field(FieldSpec::string("SourceFile"))
        .field(FieldSpec::string("Keywords"))
        .field(FieldSpec::long("ExtraDataOffset"))
        .field(FieldSpec::string("Payload"))
}

/// RECmd batch mode output
pub fn recmd_batch() -> Schema {
    Schema::fixed("recmd_batch", "RECmd batch")
        .header(
            "HivePath,HiveType,Description,Category,KeyPath,ValueName,ValueType,ValueData,\
             ValueData2,ValueData3,Comment,Recursive,Deleted,LastWriteTimestamp,PluginDetailFile",
        )
        .field(FieldSpec::string("HivePath").required())
        .field(FieldSpec::string("HiveType"))
        .field(FieldSpec::string("Description"))
        .field(FieldSpec::string("Category"))
        .field(FieldSpec::string("KeyPath"))
        .field(FieldSpec::string("ValueName"))
        .field(FieldSpec::string("ValueType"))
        .field(FieldSpec::string("ValueData"))
        .field(FieldSpec::string("ValueData2"))
        .field(FieldSpec::string("ValueData3"))
        .field(FieldSpec::string("Comment"))
        .field(FieldSpec::boolean("Recursive"))
        .field(FieldSpec::boolean("Deleted"))
        .field(FieldSpec::nullable_datetime("LastWriteTimestamp"))
        .field(FieldSpec::string("PluginDetailFile"))
}

/// SBECmd shellbags
pub fn sbecmd_shellbags() -> Schema {
    Schema::fixed("sbecmd", "SBECmd shellbags")
        .header(
            "BagPath,Slot,NodeSlot,MRUPosition,AbsolutePath,ShellType,Value,ChildBags,CreatedOn,\
             ModifiedOn,AccessedOn,LastWriteTime,MFTEntry,MFTSequenceNumber,ExtensionBlockCount,\
             FirstInteracted,LastInteracted,HasExplored,Miscellaneous",
        )
        .field(FieldSpec::string("BagPath"))
        .field(FieldSpec::int("Slot"))
        .field(FieldSpec::int("NodeSlot"))
        .field(FieldSpec::int("MRUPosition").nullable())
        .field(FieldSpec::string("AbsolutePath").required())
        .field(FieldSpec::string("ShellType"))
        .field(FieldSpec::string("Value"))
        .field(FieldSpec::int("ChildBags"))
        .field(FieldSpec::nullable_datetime("CreatedOn"))
        .field(FieldSpec::nullable_datetime("ModifiedOn"))
        .field(FieldSpec::nullable_datetime("AccessedOn"))
        .field(FieldSpec::nullable_datetime("LastWriteTime"))
        .field(FieldSpec::long("MFTEntry").nullable())
        .field(FieldSpec::int("MFTSequenceNumber").nullable())
        .field(FieldSpec::int("ExtensionBlockCount"))
        .field(FieldSpec::nullable_datetime("FirstInteracted"))
        .field(FieldSpec::nullable_datetime("LastInteracted"))
        .field(FieldSpec::boolean("HasExplored"))
        .field(FieldSpec::string("Miscellaneous"))
}

/// RBCmd recycle bin `$I` records
pub fn rbcmd() -> Schema {
    Schema::fixed("rbcmd", "RBCmd recycle bin")
        .header("SourceName,FileType,FileName,FileSize,DeletedOn")
        .field(FieldSpec::string("SourceName"))
        .field(FieldSpec::string("FileType"))
        .field(FieldSpec::string("FileName").required())
        .field(FieldSpec::long("FileSize"))
        .field(FieldSpec::datetime("DeletedOn").required())
}

/// NirSoft BrowsingHistoryView export (local timestamps)
pub fn browsing_history_view() -> Schema {
    Schema::fixed("browsing_history_view", "NirSoft BrowsingHistoryView")
        .header(
            "URL,Title,Visit Time,Visit Count,Visited From,Visit Type,Visit Duration,Web Browser,\
             User Profile,Browser Profile,URL Length,Typed Count,History File,Record ID",
        )
        .header("URL,Title,Visit Time,Visit Count,Visited From,Web Browser,User Profile")
        .ignore_header_whitespace()
        .field(FieldSpec::string("URL").required())
        .field(FieldSpec::string("Title"))
        .field(
            FieldSpec::datetime("VisitTime")
                .from_column("Visit Time")
                .date_format("%m/%d/%Y %I:%M:%S %p")
                .assume_local()
                .required(),
        )
        .field(FieldSpec::int("VisitCount").from_column("Visit Count"))
        .field(FieldSpec::string("VisitedFrom").from_column("Visited From"))
        .field(FieldSpec::string("VisitType").from_column("Visit Type"))
        .field(FieldSpec::string("VisitDuration").from_column("Visit Duration"))
        .field(FieldSpec::string("WebBrowser").from_column("Web Browser"))
        .field(FieldSpec::string("UserProfile").from_column("User Profile"))
        .field(FieldSpec::string("BrowserProfile").from_column("Browser Profile"))
        .field(FieldSpec::int("UrlLength").from_column("URL Length").nullable())
        .field(FieldSpec::int("TypedCount").from_column("Typed Count").nullable())
        .field(FieldSpec::string("HistoryFile").from_column("History File"))
        .field(FieldSpec::long("RecordId").from_column("Record ID").nullable())
}

/// Sysinternals autorunsc CSV output, banner included
pub fn autorunsc() -> Schema {
    Schema::fixed("autorunsc", "Sysinternals autorunsc")
        .header(
            "Time,Entry Location,Entry,Enabled,Category,Profile,Description,Company,Image Path,\
             Version,Launch String",
        )
        .preamble(3)
        .truthy(&["enabled"])
        .field(FieldSpec::nullable_datetime("Time").date_format("%Y%m%d-%H%M%S"))
        .field(FieldSpec::string("EntryLocation").from_column("Entry Location"))
        .field(FieldSpec::string("Entry").required())
        .field(FieldSpec::boolean("Enabled"))
        .field(FieldSpec::string("Category"))
        .field(FieldSpec::string("Profile"))
        .field(FieldSpec::string("Description"))
        .field(FieldSpec::string("Company"))
        .field(FieldSpec::string("ImagePath").from_column("Image Path"))
        .field(FieldSpec::string("Version"))
        .field(FieldSpec::string("LaunchString").from_column("Launch String"))
}

/// RegRipper TLN (five pipe-delimited fields, epoch seconds)
pub fn regripper_tln() -> Schema {
    Schema::fixed("regripper_tln", "RegRipper TLN")
        .header("Time|Source|Host|User|Description")
        .delimiter(Delimiter::Pipe)
        .field(FieldSpec::datetime("Time").unix_seconds().required())
        .field(FieldSpec::string("Source"))
        .field(FieldSpec::string("Host"))
        .field(FieldSpec::string("User"))
        .field(FieldSpec::string("Description"))
}

/// log2timeline / plaso L2T CSV supertimeline
pub fn l2t_csv() -> Schema {
    Schema::fixed("l2t_csv", "log2timeline L2T CSV")
        .header(
            "date,time,timezone,MACB,source,sourcetype,type,user,host,short,desc,version,\
             filename,inode,notes,format,extra",
        )
        .timeline("LongDescription", "Source", "SourceDescription")
        .field(
            FieldSpec::datetime("Timestamp")
                .composite(&["date", "time"])
                .date_format("%m/%d/%Y %H:%M:%S")
                .required(),
        )
        .field(FieldSpec::string("Timezone").from_column("timezone"))
        .field(FieldSpec::string("Macb").from_column("MACB"))
        .field(FieldSpec::string("Source").from_column("source"))
        .field(FieldSpec::string("SourceDescription").from_column("sourcetype"))
        .field(FieldSpec::string("Type").from_column("type"))
        .field(FieldSpec::string("User").from_column("user"))
        .field(FieldSpec::string("Host").from_column("host"))
        .field(FieldSpec::string("ShortDescription").from_column("short"))
        .field(FieldSpec::string("LongDescription").from_column("desc"))
        .field(FieldSpec::int("Version").from_column("version").nullable())
        .field(FieldSpec::string("Filename").from_column("filename"))
        .field(FieldSpec::string("Inode").from_column("inode"))
        .field(FieldSpec::string("Notes").from_column("notes"))
        .field(FieldSpec::string("Format").from_column("format"))
        .field(FieldSpec::string("Extra").from_column("extra"))
}
